//! Catalog Models
//!
//! Read models for products and categories, plus the JSON envelopes the
//! catalog routes reply with.

use serde::Serialize;

/// A product row joined with its category name.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, PartialEq)]
pub struct Product {
    pub product_id: i64,
    pub sku: String,
    pub name: String,
    pub category_id: i64,
    pub stock_quantity: i64,
    pub cost_price: f64,
    pub sell_price: f64,
    pub low_stock_threshold: i64,
    pub category_name: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, PartialEq)]
pub struct Category {
    pub category_id: i64,
    pub category_name: String,
}

/// `{success, count, data}` envelope for collection routes
#[derive(Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// `{success, data}` envelope for single-record routes
#[derive(Serialize)]
pub struct ItemResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> From<T> for ItemResponse<T> {
    fn from(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Body of `GET /status`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// `Running`, or `Degraded` when the store cannot be read
    pub status: &'static str,
    /// `OK` or `Error: <description>`
    pub database: String,
    /// Unix time in seconds
    pub timestamp: f64,
}
