use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use sqlx::{pool::PoolConnection, Sqlite, SqliteConnection};
use std::ops::{Deref, DerefMut};

use crate::{error::AppError, state::SharedState};

/// A pooled connection checked out for the lifetime of one request.
///
/// Handlers take this as an argument; the connection goes back to the pool
/// when the handler returns, whether it succeeded or not.
pub struct DbConn(pub PoolConnection<Sqlite>);

#[async_trait]
impl<S> FromRequestParts<S> for DbConn
where
    SharedState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = SharedState::from_ref(state);
        let conn = state.db.pool().acquire().await?;
        Ok(Self(conn))
    }
}

impl Deref for DbConn {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbConn {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
