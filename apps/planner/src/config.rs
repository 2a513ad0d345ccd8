//! Planner configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                 | Default               | Meaning                         |
//! |--------------------------|-----------------------|---------------------------------|
//! | `BREWCALC_DB_PATH`       | `./brewcalc_dev.db`   | SQLite database file            |
//! | `BREWCALC_FLAVOR_ID`     | required              | Flavor to plan                  |
//! | `BREWCALC_OWNER_ID`      | `demo`                | Whose stock counts to use       |
//! | `BREWCALC_BATCH_GALLONS` | stored batch size     | Plan a different batch size     |
//! | `BREWCALC_CAN_SIZE_ID`   | none                  | Re-derive cans for that size    |
//! | `BREWCALC_SAVE`          | `false`               | Persist the plan                |

use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

const DEFAULT_DB_PATH: &str = "./brewcalc_dev.db";
const DEFAULT_OWNER_ID: &str = "demo";

/// Planner configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// SQLite database file.
    pub database_path: String,

    pub flavor_id: String,

    /// Owner whose inventory counts are used.
    pub owner_id: String,

    /// Batch size override in gallons; `None` uses the stored setting.
    pub batch_gallons: Option<Decimal>,

    /// Can size used with the batch size override.
    pub can_size_id: Option<String>,

    /// Save the plan as a pending order and cost summary.
    pub save: bool,
}

impl PlannerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let batch_gallons = match get("BREWCALC_BATCH_GALLONS") {
            Some(text) => {
                let gallons = Decimal::from_str(&text)
                    .map_err(|_| ConfigError::InvalidValue("BREWCALC_BATCH_GALLONS".to_string()))?;
                if gallons <= Decimal::ZERO {
                    return Err(ConfigError::InvalidValue(
                        "BREWCALC_BATCH_GALLONS".to_string(),
                    ));
                }
                Some(gallons)
            }
            None => None,
        };

        let save = match get("BREWCALC_SAVE").as_deref() {
            None => false,
            Some(text) => parse_flag(text)
                .ok_or_else(|| ConfigError::InvalidValue("BREWCALC_SAVE".to_string()))?,
        };

        let config = PlannerConfig {
            database_path: get("BREWCALC_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),

            flavor_id: get("BREWCALC_FLAVOR_ID")
                .ok_or_else(|| ConfigError::MissingRequired("BREWCALC_FLAVOR_ID".to_string()))?,

            owner_id: get("BREWCALC_OWNER_ID").unwrap_or_else(|| DEFAULT_OWNER_ID.to_string()),

            batch_gallons,

            can_size_id: get("BREWCALC_CAN_SIZE_ID"),

            save,
        };

        // A can size only means something alongside a new batch size
        if config.can_size_id.is_some() && config.batch_gallons.is_none() {
            return Err(ConfigError::MissingRequired(
                "BREWCALC_BATCH_GALLONS (set with BREWCALC_CAN_SIZE_ID)".to_string(),
            ));
        }

        Ok(config)
    }
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<PlannerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PlannerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("BREWCALC_FLAVOR_ID", "flv-lime")]).unwrap();
        assert_eq!(config.database_path, DEFAULT_DB_PATH);
        assert_eq!(config.owner_id, "demo");
        assert_eq!(config.batch_gallons, None);
        assert!(!config.save);
    }

    #[test]
    fn test_flavor_required() {
        assert!(matches!(
            load(&[]).unwrap_err(),
            ConfigError::MissingRequired(_)
        ));
        assert!(matches!(
            load(&[("BREWCALC_FLAVOR_ID", "  ")]).unwrap_err(),
            ConfigError::MissingRequired(_)
        ));
    }

    #[test]
    fn test_batch_override_and_save() {
        let config = load(&[
            ("BREWCALC_FLAVOR_ID", "flv-lime"),
            ("BREWCALC_BATCH_GALLONS", "250.5"),
            ("BREWCALC_CAN_SIZE_ID", "can-16oz"),
            ("BREWCALC_SAVE", "yes"),
        ])
        .unwrap();
        assert_eq!(config.batch_gallons, Some(Decimal::new(2505, 1)));
        assert_eq!(config.can_size_id.as_deref(), Some("can-16oz"));
        assert!(config.save);
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("BREWCALC_BATCH_GALLONS", "lots"),
            ("BREWCALC_BATCH_GALLONS", "-10"),
            ("BREWCALC_SAVE", "maybe"),
        ] {
            let err = load(&[("BREWCALC_FLAVOR_ID", "flv-lime"), (key, value)]).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue(ref k) if k == key));
        }
    }

    #[test]
    fn test_can_size_needs_batch_size() {
        let err = load(&[
            ("BREWCALC_FLAVOR_ID", "flv-lime"),
            ("BREWCALC_CAN_SIZE_ID", "can-16oz"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(_)));
    }
}
