//! # Repository Module
//!
//! Database repository implementations for Brewcalc.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  Database                                                               │
//! │  ├── catalog()    → CatalogRepository    suppliers, ingredients,       │
//! │  │                                        flavors, recipes, tiers,     │
//! │  │                                        overrides, can sizes         │
//! │  ├── inventory()  → InventoryRepository  stock per (ingredient, owner) │
//! │  ├── settings()   → SettingsRepository   batch size, batch costs,      │
//! │  │                                        freight                      │
//! │  └── orders()     → OrderRepository      saved plans and summaries     │
//! │                                                                         │
//! │  Read queries are free functions generic over the executor, so the     │
//! │  snapshot loader can run them all inside one transaction.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Decimal Columns
//! Decimal values are stored as TEXT. Reads go through
//! [`parse_lenient`](brewcalc_core::numeric::parse_lenient): a blank or
//! corrupt cell becomes 0 instead of failing the whole query.

use brewcalc_core::numeric::{parse_lenient, parse_lenient_opt};
use brewcalc_core::Money;
use rust_decimal::Decimal;
use uuid::Uuid;

pub mod catalog;
pub mod inventory;
pub mod order;
pub mod settings;

/// Generates a new record ID.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// TEXT ⇄ Decimal
// =============================================================================

pub(crate) fn decimal_from_text(text: &str) -> Decimal {
    parse_lenient(text)
}

pub(crate) fn optional_decimal(text: Option<&str>) -> Option<Decimal> {
    text.and_then(parse_lenient_opt)
}

pub(crate) fn money_from_text(text: &str) -> Money {
    Money::new(parse_lenient(text))
}

pub(crate) fn decimal_to_text(value: Decimal) -> String {
    value.normalize().to_string()
}

pub(crate) fn money_to_text(value: Money) -> String {
    decimal_to_text(value.amount())
}

/// Non-negative SQLite integer into a count; corrupt values read as 0.
pub(crate) fn count_from_i64(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_text_codec() {
        assert_eq!(decimal_to_text(dec!(84.500)), "84.5");
        assert_eq!(decimal_from_text("84.500"), dec!(84.5));
        assert_eq!(decimal_from_text(""), Decimal::ZERO);
        assert_eq!(optional_decimal(Some("x")), None);
        assert_eq!(optional_decimal(None), None);
        assert_eq!(money_from_text("2.50"), Money::new(dec!(2.5)));
        assert_eq!(count_from_i64(-4), 0);
    }
}
