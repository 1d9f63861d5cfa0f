//! Catalog queries.
//!
//! Borrows the request's connection; nothing here opens or holds a pool handle.

use sqlx::SqliteConnection;

use super::models::{Category, Product};

const PRODUCT_COLUMNS: &str = r#"
    SELECT p.product_id, p.sku, p.name, p.category_id, p.stock_quantity,
           p.cost_price, p.sell_price, p.low_stock_threshold, c.category_name
    FROM Products p
    JOIN Categories c ON p.category_id = c.category_id
"#;

pub struct CatalogRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> CatalogRepository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// All products with their category name, ordered by product name.
    pub async fn list_products(&mut self) -> Result<Vec<Product>, sqlx::Error> {
        let sql = format!("{PRODUCT_COLUMNS} ORDER BY p.name");
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(products)
    }

    /// Looks a product up by SKU, ignoring case.
    pub async fn find_by_sku(&mut self, sku: &str) -> Result<Option<Product>, sqlx::Error> {
        let sql = format!("{PRODUCT_COLUMNS} WHERE p.sku = ? COLLATE NOCASE");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(sku)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(product)
    }

    pub async fn list_categories(&mut self) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "SELECT category_id, category_name FROM Categories ORDER BY category_name",
        )
        .fetch_all(&mut *self.conn)
        .await
    }

    /// Trivial read used by the liveness check.
    pub async fn ping(&mut self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1 FROM Users LIMIT 1")
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn seeded() -> Database {
        let db = Database::connect(":memory:").await.unwrap();
        db.bootstrap().await.unwrap();
        db
    }

    #[tokio::test]
    async fn products_are_ordered_by_name_with_category() {
        let db = seeded().await;
        let mut conn = db.pool().acquire().await.unwrap();

        let products = CatalogRepository::new(&mut conn).list_products().await.unwrap();
        let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(
            names,
            ["Cotton T-Shirt", "Energy Drink Pack", "LED Lamp", "Smartphone X"]
        );
        assert_eq!(products[3].category_name, "Electronics");
        assert_eq!(products[3].sell_price, 799.99);
    }

    #[tokio::test]
    async fn sku_lookup_ignores_case() {
        let db = seeded().await;
        let mut conn = db.pool().acquire().await.unwrap();
        let mut repo = CatalogRepository::new(&mut conn);

        let lower = repo.find_by_sku("elc001").await.unwrap();
        let upper = repo.find_by_sku("ELC001").await.unwrap();

        assert!(lower.is_some());
        assert_eq!(lower, upper);
        assert!(repo.find_by_sku("NOPE42").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn categories_are_ordered_by_name() {
        let db = seeded().await;
        let mut conn = db.pool().acquire().await.unwrap();

        let categories = CatalogRepository::new(&mut conn).list_categories().await.unwrap();
        let names: Vec<_> = categories.iter().map(|c| c.category_name.as_str()).collect();

        assert_eq!(
            names,
            ["Apparel", "Beverages", "Electronics", "Home Goods", "Snacks"]
        );
    }

    #[tokio::test]
    async fn ping_fails_without_schema() {
        let db = Database::connect(":memory:").await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();

        assert!(CatalogRepository::new(&mut conn).ping().await.is_err());
    }
}
