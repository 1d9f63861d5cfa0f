//! Point-of-Sale Backend Library
//!
//! One HTTP service with two independent domains: catalog browsing backed by
//! SQLite, and pure cart pricing for the checkout flow.

// Domain modules
pub mod cart;
pub mod catalog;

// Infrastructure
pub mod config;
pub mod db;
pub mod error;
pub mod router;
pub mod state;
