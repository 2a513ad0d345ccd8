//! # Requirement Calculator
//!
//! Turns recipe percentages into absolute ingredient weights for a batch.
//!
//! ## Formula
//! ```text
//! requirement = batch_gallons × density × (percentage / 100)
//!               rounded to 3 decimal places
//!
//! 500 gal × 8.450 lb/gal × 2% = 84.500 lb
//! ```
//!
//! ## Density Fallback
//! ```text
//! recipe line density  ──(absent or ≤ 0)──►  ingredient default_density
//!                                                   │
//!                                          (absent or ≤ 0)
//!                                                   ▼
//!                                           DEFAULT_DENSITY (8.450)
//! ```

use rust_decimal::Decimal;

use crate::numeric::{self, floor_count, non_negative, ratio, round_quantity};
use crate::types::{BatchSizeConfig, CanSize};
use crate::{DEFAULT_DENSITY, OUNCES_PER_GALLON};

/// Picks the density for a recipe line.
///
/// ## Example
/// ```rust
/// use brewcalc_core::requirement::resolve_density;
/// use brewcalc_core::{BASE_LIQUID_DENSITY, DEFAULT_DENSITY};
/// use rust_decimal::Decimal;
///
/// assert_eq!(resolve_density(None, None), DEFAULT_DENSITY);
/// assert_eq!(resolve_density(None, Some(BASE_LIQUID_DENSITY)), BASE_LIQUID_DENSITY);
/// assert_eq!(resolve_density(Some(Decimal::ZERO), None), DEFAULT_DENSITY);
/// ```
pub fn resolve_density(line_density: Option<Decimal>, ingredient_default: Option<Decimal>) -> Decimal {
    line_density
        .filter(|d| *d > Decimal::ZERO)
        .or_else(|| ingredient_default.filter(|d| *d > Decimal::ZERO))
        .unwrap_or(DEFAULT_DENSITY)
}

/// Clamps a recipe percentage into 0–100.
#[inline]
pub fn clamp_percentage(percentage: Decimal) -> Decimal {
    percentage.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Absolute weight of one ingredient for a batch.
///
/// Negative batch sizes count as zero and the percentage is clamped into
/// 0–100. The same inputs always produce the same output, so recomputing
/// after every batch size edit never drifts.
///
/// ## Example
/// ```rust
/// use brewcalc_core::requirement::ingredient_requirement;
/// use rust_decimal::Decimal;
///
/// let req = ingredient_requirement(
///     Decimal::from(500),
///     Decimal::from(2),
///     Decimal::new(8450, 3),
/// );
/// assert_eq!(req, Decimal::new(84500, 3));
/// ```
pub fn ingredient_requirement(batch_gallons: Decimal, percentage: Decimal, density: Decimal) -> Decimal {
    let gallons = non_negative(batch_gallons);
    let fraction = ratio(clamp_percentage(percentage), Decimal::ONE_HUNDRED);
    round_quantity(numeric::mul(numeric::mul(gallons, density), fraction))
}

/// How many cans a batch fills: `floor(gallons × 128 / can_oz)`.
///
/// Zero when the can size is not positive.
///
/// ## Example
/// ```rust
/// use brewcalc_core::requirement::cans_for_batch;
/// use rust_decimal::Decimal;
///
/// assert_eq!(cans_for_batch(Decimal::from(500), Decimal::from(12)), 5333);
/// assert_eq!(cans_for_batch(Decimal::from(500), Decimal::ZERO), 0);
/// ```
pub fn cans_for_batch(size_gallons: Decimal, can_size_oz: Decimal) -> u32 {
    if can_size_oz <= Decimal::ZERO {
        return 0;
    }
    let ounces = numeric::mul(non_negative(size_gallons), OUNCES_PER_GALLON);
    floor_count(ratio(ounces, can_size_oz))
}

impl BatchSizeConfig {
    /// Returns a copy resized to `gallons`.
    ///
    /// Negative sizes become zero. When a can size is known the can count is
    /// re-derived from it; otherwise the previous count is kept.
    pub fn resized(&self, gallons: Decimal, can_size: Option<&CanSize>) -> Self {
        let size_gallons = non_negative(gallons);
        let cans_per_batch = match can_size {
            Some(can) => cans_for_batch(size_gallons, can.size_oz),
            None => self.cans_per_batch,
        };
        BatchSizeConfig {
            size_gallons,
            cans_per_batch,
            can_size_id: can_size
                .map(|can| can.id.clone())
                .or_else(|| self.can_size_id.clone()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
