//! # Error Types
//!
//! Domain-specific error types for brewcalc-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  brewcalc-core errors (this file)                                      │
//! │  ├── CoreError        - Domain errors (empty recipe, ...)              │
//! │  └── ValidationError  - Field rule violations                          │
//! │                                                                         │
//! │  brewcalc-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → planner (anyhow)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Uses of ValidationError
//! Catalog writes reject invalid records outright. A calculation run never
//! fails on bad data: the same errors are attached to the plan as
//! [`DataQualityIssue`](crate::engine::DataQualityIssue)s and the affected
//! numbers degrade to zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The flavor has no recipe lines, so there is nothing to calculate.
    ///
    /// ## When This Occurs
    /// - A flavor was created in the catalog but no ingredients were attached
    /// - All recipe lines were removed during catalog maintenance
    #[error("No ingredients found for flavor {flavor_id}")]
    EmptyRecipe { flavor_id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Serializable so they can travel inside an order plan as data-quality
/// findings.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be below zero.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        #[ts(as = "String")]
        min: Decimal,
        #[ts(as = "String")]
        max: Decimal,
    },

    /// Packaging is costed per can but the batch yields no cans.
    #[error("packaging costs {per_unit} per can but cans per batch is 0")]
    NoCansForPackaging {
        #[ts(as = "String")]
        per_unit: Decimal,
    },

    /// Invalid format (e.g., part number with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two tiers with the same breakpoint).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::MustBePositive`].
    pub fn must_be_positive(field: impl Into<String>) -> Self {
        ValidationError::MustBePositive {
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::MustNotBeNegative`].
    pub fn must_not_be_negative(field: impl Into<String>) -> Self {
        ValidationError::MustNotBeNegative {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
