//! Catalog Module
//!
//! Read-only access to the product catalog:
//! - Read models (Product, Category) and response envelopes
//! - Queries over a request-scoped connection
//! - REST API handlers, including the store liveness check

pub mod handlers;
pub mod models;
pub mod repository;

pub use handlers::routes;
