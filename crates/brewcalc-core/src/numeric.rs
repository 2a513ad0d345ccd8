//! # Numeric Normalization
//!
//! The "safe number" rules applied wherever a value enters the engine.
//!
//! ## Why Normalize?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ONE BAD FIELD MUST NOT POISON THE WHOLE SUMMARY                        │
//! │                                                                         │
//! │  Form input "", "abc", null, NaN, Infinity                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  safe_decimal / parse_lenient / lenient::deserialize                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Decimal 0   ← never NaN, never undefined                               │
//! │                                                                         │
//! │  Inside the engine every value is a Decimal, so arithmetic is exact    │
//! │  and repeated runs are bit-identical.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Arithmetic helpers here saturate or fall back to zero instead of
//! panicking on overflow and division by zero.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on ingredient requirements.
pub const QUANTITY_DECIMALS: u32 = 3;

// =============================================================================
// Boundary Conversions
// =============================================================================

/// Converts a float from a collaborator into a Decimal.
///
/// NaN and ±Infinity become zero.
///
/// ## Example
/// ```rust
/// use brewcalc_core::numeric::safe_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(safe_decimal(f64::NAN), Decimal::ZERO);
/// assert_eq!(safe_decimal(2.5), Decimal::new(25, 1));
/// ```
pub fn safe_decimal(value: f64) -> Decimal {
    safe_decimal_opt(value).unwrap_or(Decimal::ZERO)
}

/// Like [`safe_decimal`] but keeps "not a number" distinguishable as `None`.
pub fn safe_decimal_opt(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value).map(|d| d.normalize())
}

/// Parses user or storage text into a Decimal, defaulting to zero.
///
/// Blank and non-numeric text become zero. Scientific notation is accepted.
///
/// ## Example
/// ```rust
/// use brewcalc_core::numeric::parse_lenient;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_lenient(" 12.50 "), Decimal::new(1250, 2));
/// assert_eq!(parse_lenient(""), Decimal::ZERO);
/// assert_eq!(parse_lenient("n/a"), Decimal::ZERO);
/// ```
pub fn parse_lenient(text: &str) -> Decimal {
    parse_lenient_opt(text).unwrap_or(Decimal::ZERO)
}

/// Like [`parse_lenient`] but returns `None` for blank or non-numeric text.
pub fn parse_lenient_opt(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

// =============================================================================
// Guarded Arithmetic
// =============================================================================

/// Clamps negative values to zero.
#[inline]
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Multiplies, saturating at the Decimal bounds.
#[inline]
pub fn mul(a: Decimal, b: Decimal) -> Decimal {
    a.saturating_mul(b)
}

/// Divides, returning zero when the divisor is zero or the result overflows.
///
/// ## Example
/// ```rust
/// use brewcalc_core::numeric::ratio;
/// use rust_decimal::Decimal;
///
/// assert_eq!(ratio(Decimal::ONE, Decimal::ZERO), Decimal::ZERO);
/// assert_eq!(ratio(Decimal::ONE, Decimal::TWO), Decimal::new(5, 1));
/// ```
#[inline]
pub fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Rounds a quantity to [`QUANTITY_DECIMALS`] places, half away from zero.
#[inline]
pub fn round_quantity(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(QUANTITY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// Floors a non-negative Decimal into a count, saturating at `u32::MAX`.
pub fn floor_count(value: Decimal) -> u32 {
    if value <= Decimal::ZERO {
        return 0;
    }
    value.floor().to_u32().unwrap_or(u32::MAX)
}

// =============================================================================
// Lenient Serde
// =============================================================================

/// `#[serde(deserialize_with = "...")]` helpers for collaborator payloads.
///
/// ## Usage
/// ```rust
/// use brewcalc_core::numeric::lenient;
/// use rust_decimal::Decimal;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Row {
///     #[serde(default, deserialize_with = "lenient::deserialize")]
///     cost: Decimal,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"cost": "oops"}"#).unwrap();
/// assert_eq!(row.cost, Decimal::ZERO);
/// ```
pub mod lenient {
    use super::*;
    use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
    use serde::Deserializer;

    /// Deserializes any JSON-ish value into a Decimal; non-numbers become 0.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer
            .deserialize_any(LenientVisitor)
            .map(|value| value.unwrap_or(Decimal::ZERO))
    }

    /// Deserializes into `Option<Decimal>`; null and non-numbers become `None`.
    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LenientVisitor)
    }

    struct LenientVisitor;

    impl<'de> Visitor<'de> for LenientVisitor {
        type Value = Option<Decimal>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number, a numeric string, or null")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(safe_decimal_opt(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(Decimal::from(v)))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(Decimal::from(v)))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(parse_lenient_opt(v))
        }

        fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(LenientVisitor)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
