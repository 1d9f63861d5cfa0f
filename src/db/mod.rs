//! SQLite store: pool setup, schema bootstrap and the per-request connection extractor.

mod conn;

pub use conn::DbConn;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

const SCHEMA_SQL: &str = include_str!("schema.sql");
const SEED_SQL: &str = include_str!("seed.sql");

static MEMDB_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Handle to the connection pool. Cloning is cheap.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
    const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

    /// Opens the store at `path`. `:memory:` gives a private in-memory database per call.
    pub async fn connect(path: &str) -> Result<Self, DbError> {
        let pool = if path == ":memory:" {
            // Shared-cache memory databases are process global by name, so each
            // pool gets its own.
            let id = MEMDB_COUNTER.fetch_add(1, Ordering::Relaxed);
            let uri = format!(
                "file:pos-memdb-{}-{}?mode=memory&cache=shared",
                std::process::id(),
                id
            );

            let options = SqliteConnectOptions::new()
                .filename(&uri)
                .shared_cache(true)
                .foreign_keys(true)
                .create_if_missing(true);

            // The database lives only while one connection is open.
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .acquire_timeout(Self::ACQUIRE_TIMEOUT)
                .connect_with(options)
                .await?
        } else {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    if let Err(e) = std::fs::create_dir_all(parent) {
                        warn!(path = %parent.display(), error = %e, "Failed to create database directory");
                    }
                }
            }

            let options = SqliteConnectOptions::new()
                .filename(path)
                .foreign_keys(true)
                .journal_mode(SqliteJournalMode::Wal)
                .create_if_missing(true);

            SqlitePoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Self::ACQUIRE_TIMEOUT)
                .idle_timeout(Some(Self::IDLE_TIMEOUT))
                .test_before_acquire(true)
                .connect_with(options)
                .await?
        };

        info!(path = %path, "Database connected");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the tables and loads the seed rows in a single transaction.
    ///
    /// Returns `Ok(false)` without touching anything when the schema is
    /// already present, so repeated startups are harmless. Any other failure
    /// rolls the transaction back and is returned.
    pub async fn bootstrap(&self) -> Result<bool, DbError> {
        self.bootstrap_with(SCHEMA_SQL, SEED_SQL).await
    }

    async fn bootstrap_with(&self, schema: &str, seed: &str) -> Result<bool, DbError> {
        if self.schema_exists().await? {
            warn!("Database initialization skipped (tables already exist)");
            return Ok(false);
        }

        info!("Initializing database...");
        let mut tx = self.pool.begin().await?;
        if let Err(e) = apply_schema(&mut tx, schema, seed).await {
            tx.rollback().await?;
            return Err(e.into());
        }
        tx.commit().await?;

        info!("Database initialized and seeded successfully");
        Ok(true)
    }

    async fn schema_exists(&self) -> Result<bool, DbError> {
        let found: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'Products'",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(found.is_some())
    }
}

async fn apply_schema(
    tx: &mut Transaction<'_, Sqlite>,
    schema: &str,
    seed: &str,
) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(schema).execute(&mut **tx).await?;
    sqlx::raw_sql(seed).execute(&mut **tx).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn count(db: &Database, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn bootstrap_seeds_a_fresh_store() {
        let db = Database::connect(":memory:").await.unwrap();

        assert!(db.bootstrap().await.unwrap());
        assert_eq!(count(&db, "Categories").await, 5);
        assert_eq!(count(&db, "Users").await, 2);
        assert_eq!(count(&db, "Products").await, 4);
        assert_eq!(count(&db, "Invoices").await, 1);
        assert_eq!(count(&db, "InvoiceItems").await, 2);
    }

    #[tokio::test]
    async fn repeated_bootstrap_is_tolerated() {
        let db = Database::connect(":memory:").await.unwrap();

        assert!(db.bootstrap().await.unwrap());
        assert!(!db.bootstrap().await.unwrap());
        assert_eq!(count(&db, "Products").await, 4);
    }

    #[tokio::test]
    async fn failing_seed_on_fresh_store_is_an_error() {
        let db = Database::connect(":memory:").await.unwrap();
        let bad_seed = "INSERT INTO Users (username, password_hash, role) VALUES ('x', 'h', 'manager');";

        let result = db.bootstrap_with(SCHEMA_SQL, bad_seed).await;
        assert!(matches!(result, Err(DbError::Sqlx(_))));

        // Rolled back: the schema is gone and a normal bootstrap still works.
        assert!(!db.schema_exists().await.unwrap());
        assert!(db.bootstrap().await.unwrap());
    }

    #[tokio::test]
    async fn partial_schema_is_not_swallowed() {
        let db = Database::connect(":memory:").await.unwrap();
        sqlx::query("CREATE TABLE Users (user_id INTEGER PRIMARY KEY)")
            .execute(db.pool())
            .await
            .unwrap();

        assert!(db.bootstrap().await.is_err());
    }

    #[tokio::test]
    async fn memory_stores_are_isolated() {
        let seeded = Database::connect(":memory:").await.unwrap();
        seeded.bootstrap().await.unwrap();

        let empty = Database::connect(":memory:").await.unwrap();
        let tables: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'Products'")
                .fetch_one(empty.pool())
                .await
                .unwrap();
        assert_eq!(tables, 0);
    }

    #[tokio::test]
    async fn role_constraint_rejects_unknown_roles() {
        let db = Database::connect(":memory:").await.unwrap();
        db.bootstrap().await.unwrap();

        let result = sqlx::query("INSERT INTO Users (username, password_hash, role) VALUES ('x', 'h', 'manager')")
            .execute(db.pool())
            .await;
        assert!(result.is_err());
    }
}
