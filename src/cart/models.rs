//! Cart Pricing Models
//!
//! Request and response shapes for the checkout pricing endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Cart Domain Models
// =============================================================================

/// One product entry in a cart. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Caller-supplied product identifier
    pub product_id: String,

    /// Display name of the product
    pub name: String,

    /// Unit price; must be greater than zero
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Number of units; must be greater than zero. Signed so that negative
    /// input reaches validation instead of failing deserialization.
    pub quantity: i64,
}

/// Body of `POST /cart/calculate`.
///
/// Derived fields sent by the client (`subtotal`, `total`, ...) are ignored.
#[derive(Debug, Deserialize)]
pub struct CalculateInput {
    pub items: Vec<LineItem>,

    /// Falls back to the configured default rate when absent
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub tax_rate: Option<Decimal>,
}

/// A cart plus its derived totals.
///
/// `subtotal`, `tax_amount` and `total` stay at zero until `Cart::calculate`
/// fills them in.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Cart {
    pub items: Vec<LineItem>,

    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl Cart {
    pub fn new(items: Vec<LineItem>, tax_rate: Decimal) -> Self {
        Self {
            items,
            subtotal: Decimal::ZERO,
            tax_rate,
            tax_amount: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// Response for the root liveness route
#[derive(Serialize)]
pub struct RootResponse {
    pub status: &'static str,
    pub message: &'static str,

    #[serde(with = "rust_decimal::serde::float")]
    pub initial_total_check: Decimal,
}
