//! Cart Pricing Logic
//!
//! Pure computation of subtotal, tax and total. All arithmetic is exact
//! decimal; rounding is round-half-away-from-zero at two places and is
//! applied only to the three output fields. Amounts are never negative, so a
//! half cent always rounds up, and rounding `subtotal + tax` agrees with adding
//! the already rounded parts.

use rust_decimal::{Decimal, RoundingStrategy};

use super::models::{Cart, LineItem};
use crate::error::AppError;

/// Decimal places kept on every monetary output.
pub const MONEY_DP: u32 = 2;

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Rejects the first item with a non-positive price or quantity.
///
/// The error names the field by position, e.g. `items[2].quantity`.
pub fn validate_items(items: &[LineItem]) -> Result<(), AppError> {
    for (idx, item) in items.iter().enumerate() {
        if item.price <= Decimal::ZERO {
            return Err(AppError::validation(
                format!("items[{idx}].price"),
                "must be greater than zero",
            ));
        }
        if item.quantity <= 0 {
            return Err(AppError::validation(
                format!("items[{idx}].quantity"),
                "must be greater than zero",
            ));
        }
    }
    Ok(())
}

fn out_of_range(field: impl Into<String>, what: &str) -> AppError {
    AppError::validation(field, format!("gives a {what} out of range"))
}

impl Cart {
    /// Validates the cart and fills in `subtotal`, `tax_amount` and `total`.
    ///
    /// `tax_amount` is taken from the rounded subtotal, so
    /// `total == subtotal + tax_amount` holds exactly on the result. Amounts
    /// that would overflow `Decimal` fail validation on the field that pushed
    /// them over.
    pub fn calculate(mut self) -> Result<Self, AppError> {
        if self.tax_rate < Decimal::ZERO {
            return Err(AppError::validation("tax_rate", "must not be negative"));
        }
        validate_items(&self.items)?;

        let raw_subtotal = self.items.iter().enumerate().try_fold(
            Decimal::ZERO,
            |acc, (idx, item)| {
                item.price
                    .checked_mul(Decimal::from(item.quantity))
                    .and_then(|line| acc.checked_add(line))
                    .ok_or_else(|| out_of_range(format!("items[{idx}].price"), "line total"))
            },
        )?;

        self.subtotal = round_money(raw_subtotal);
        self.tax_amount = self
            .subtotal
            .checked_mul(self.tax_rate)
            .map(round_money)
            .ok_or_else(|| out_of_range("tax_rate", "tax amount"))?;
        self.total = self
            .subtotal
            .checked_add(self.tax_amount)
            .map(round_money)
            .ok_or_else(|| out_of_range("tax_rate", "total"))?;

        Ok(self)
    }
}

/// Total of the one-item cart reported by the root route as a self check.
pub fn sample_total(tax_rate: Decimal) -> Result<Decimal, AppError> {
    let sample = Cart::new(
        vec![LineItem {
            product_id: "A01".into(),
            name: "Test Item 1".into(),
            price: Decimal::new(1000, 2),
            quantity: 1,
        }],
        tax_rate,
    );
    Ok(sample.calculate()?.total)
}

/// Produces a human-readable one-line summary for a list of line items.
///
/// Example output: `"2x Apple, 1x Banana"`.
pub fn format_item_summary(items: &[LineItem]) -> String {
    items
        .iter()
        .map(|i| format!("{}x {}", i.quantity, i.name))
        .collect::<Vec<_>>()
        .join(", ")
}
