//! Cart Pricing Module
//!
//! This module contains the checkout pricing logic, including:
//! - Domain models (LineItem, Cart, request input)
//! - The pure total calculation and its validation
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export commonly used types for convenience
pub use handlers::{root_routes, routes};
