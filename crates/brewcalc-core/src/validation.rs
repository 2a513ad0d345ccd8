//! # Validation Module
//!
//! Field rules for catalog and configuration records.
//!
//! ## Where Rules Apply
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Catalog write (brewcalc-db)                                           │
//! │  ├── validate_ingredient / validate_recipe_line / validate_tier        │
//! │  └── Err → record rejected, nothing stored                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Calculation run (engine)                                              │
//! │  ├── same field rules, applied to the snapshot                         │
//! │  └── Err → DataQualityIssue on the plan, value degraded to zero        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Database (SQLite)                                                     │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints                                                │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use brewcalc_core::validation::{validate_moq, validate_percentage};
//! use rust_decimal::Decimal;
//!
//! assert!(validate_moq(Decimal::from(10)).is_ok());
//! assert!(validate_percentage(Decimal::from(150)).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{BatchCostsConfig, BatchSizeConfig, Ingredient, PricingTier, RecipeLine};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_PART_NUMBER_LEN: usize = 50;
const MAX_UNIT_LEN: usize = 20;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (ingredient, supplier, flavor, can size).
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a unit of measure such as "lb" or "gal".
pub fn validate_unit(unit: &str) -> ValidationResult<()> {
    let unit = unit.trim();

    if unit.is_empty() {
        return Err(ValidationError::Required {
            field: "unit".to_string(),
        });
    }

    if unit.chars().count() > MAX_UNIT_LEN {
        return Err(ValidationError::TooLong {
            field: "unit".to_string(),
            max: MAX_UNIT_LEN,
        });
    }

    Ok(())
}

/// Validates a supplier part number.
///
/// ## Rules
/// - At most 50 characters
/// - Letters, numbers, hyphens, underscores, dots and slashes only
///
/// ## Example
/// ```rust
/// use brewcalc_core::validation::validate_part_number;
///
/// assert!(validate_part_number("CA-50LB/B").is_ok());
/// assert!(validate_part_number("has space").is_err());
/// ```
pub fn validate_part_number(part_number: &str) -> ValidationResult<()> {
    let part_number = part_number.trim();

    if part_number.is_empty() {
        return Err(ValidationError::Required {
            field: "part_number".to_string(),
        });
    }

    if part_number.len() > MAX_PART_NUMBER_LEN {
        return Err(ValidationError::TooLong {
            field: "part_number".to_string(),
            max: MAX_PART_NUMBER_LEN,
        });
    }

    if !part_number
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "part_number".to_string(),
            reason: "must contain only letters, numbers, hyphens, underscores, dots, and slashes"
                .to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a minimum order quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ## What Happens Otherwise
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Catalog write:  rejected                                               │
/// │  Calculation:    MOQ rounding skipped, shortage bought as one lot,     │
/// │                  issue attached to the plan                            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_moq(moq: Decimal) -> ValidationResult<()> {
    if moq <= Decimal::ZERO {
        return Err(ValidationError::must_be_positive("moq"));
    }

    Ok(())
}

/// Validates a recipe percentage.
///
/// ## Rules
/// - Between 0 and 100 inclusive
pub fn validate_percentage(percentage: Decimal) -> ValidationResult<()> {
    if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "percentage".to_string(),
            min: Decimal::ZERO,
            max: Decimal::ONE_HUNDRED,
        });
    }

    Ok(())
}

/// Validates an explicit density. Absent is fine (a default applies).
pub fn validate_density(density: Option<Decimal>) -> ValidationResult<()> {
    match density {
        Some(d) if d <= Decimal::ZERO => Err(ValidationError::must_be_positive("density")),
        _ => Ok(()),
    }
}

/// Validates an on-hand inventory level.
pub fn validate_current_level(level: Decimal) -> ValidationResult<()> {
    if level < Decimal::ZERO {
        return Err(ValidationError::must_not_be_negative("current_level"));
    }

    Ok(())
}

/// Validates a monetary amount that may be zero but not negative.
///
/// ## Example
/// ```rust
/// use brewcalc_core::validation::validate_price;
/// use brewcalc_core::Money;
/// use rust_decimal::Decimal;
///
/// assert!(validate_price("can_cost", Money::zero()).is_ok());
/// assert!(validate_price("can_cost", Money::new(Decimal::new(-1, 2))).is_err());
/// ```
pub fn validate_price(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.amount() < Decimal::ZERO {
        return Err(ValidationError::must_not_be_negative(field));
    }

    Ok(())
}

/// Validates a tier breakpoint.
pub fn validate_min_quantity(min_quantity: Decimal) -> ValidationResult<()> {
    if min_quantity < Decimal::ZERO {
        return Err(ValidationError::must_not_be_negative("min_quantity"));
    }

    Ok(())
}

/// Validates a batch size in gallons.
pub fn validate_batch_gallons(gallons: Decimal) -> ValidationResult<()> {
    if gallons <= Decimal::ZERO {
        return Err(ValidationError::must_be_positive("size_gallons"));
    }

    Ok(())
}

/// Validates a can size in fluid ounces.
pub fn validate_can_size_oz(size_oz: Decimal) -> ValidationResult<()> {
    if size_oz <= Decimal::ZERO {
        return Err(ValidationError::must_be_positive("size_oz"));
    }

    Ok(())
}

/// Packaging is costed per can, so a batch with per-can costs must yield
/// cans.
pub fn validate_packaging_capacity(
    costs: &BatchCostsConfig,
    batch_size: &BatchSizeConfig,
) -> ValidationResult<()> {
    let per_unit = costs.packaging_cost_per_unit();
    if batch_size.cans_per_batch == 0 && per_unit.is_positive() {
        return Err(ValidationError::NoCansForPackaging {
            per_unit: per_unit.amount(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates an ingredient before it is written to the catalog.
pub fn validate_ingredient(ingredient: &Ingredient) -> ValidationResult<()> {
    validate_name("name", &ingredient.name)?;
    validate_unit(&ingredient.unit)?;
    validate_moq(ingredient.moq)?;
    validate_density(ingredient.default_density)?;
    if let Some(part_number) = &ingredient.part_number {
        validate_part_number(part_number)?;
    }
    validate_name("supplier", &ingredient.supplier.id)?;

    Ok(())
}

/// Validates a recipe line before it is written to the catalog.
pub fn validate_recipe_line(line: &RecipeLine) -> ValidationResult<()> {
    validate_name("flavor_id", &line.flavor_id)?;
    validate_name("ingredient_id", &line.ingredient_id)?;
    validate_percentage(line.percentage)?;
    validate_density(line.density)?;

    Ok(())
}

/// Validates a pricing tier before it is written to the catalog.
pub fn validate_tier(tier: &PricingTier) -> ValidationResult<()> {
    validate_name("ingredient_id", &tier.ingredient_id)?;
    validate_min_quantity(tier.min_quantity)?;
    validate_price("price_per_unit", tier.price_per_unit)?;

    Ok(())
}

/// Validates the batch costs configuration; every amount must be ≥ 0.
pub fn validate_batch_costs(costs: &BatchCostsConfig) -> ValidationResult<()> {
    validate_price("can_cost", costs.can_cost)?;
    validate_price("can_end_cost", costs.can_end_cost)?;
    validate_price("tray_cost", costs.tray_cost)?;
    validate_price("paktech_cost", costs.paktech_cost)?;
    validate_price("storage_cost", costs.storage_cost)?;
    validate_price("tolling_cost_per_gallon", costs.tolling_cost_per_gallon)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
