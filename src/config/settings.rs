//! User settings for basket
//!
//! Persisted preferences, and the [`BasketConfig`] derived from them that the
//! in-memory core receives at construction time.

use serde::{Deserialize, Serialize};

use super::paths::BasketPaths;
use crate::error::BasketError;
use crate::models::ShoppablePolicy;

/// Largest number of decimal places a `rust_decimal::Decimal` can carry
pub const MAX_AMOUNT_PRECISION: u32 = 28;

/// Configuration handed to the core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasketConfig {
    /// Whether deleting a category also deletes its items when the caller
    /// does not choose explicitly
    pub cascade_delete_default: bool,
    /// Decimal places kept for amounts
    pub amount_precision: u32,
    /// Which items appear on the shopping list
    pub shoppable_policy: ShoppablePolicy,
    /// List found entries after the others within a category
    pub found_last: bool,
}

impl Default for BasketConfig {
    fn default() -> Self {
        Self {
            cascade_delete_default: false,
            amount_precision: 2,
            shoppable_policy: ShoppablePolicy::AllItems,
            found_last: false,
        }
    }
}

/// User settings for basket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Delete a category's items along with it unless told otherwise
    #[serde(default)]
    pub cascade_delete_default: bool,

    /// Decimal places kept for amounts
    #[serde(default = "default_amount_precision")]
    pub amount_precision: u32,

    /// Which items appear on the shopping list
    #[serde(default)]
    pub shoppable_policy: ShoppablePolicy,

    /// Show found entries at the bottom of each category
    #[serde(default)]
    pub found_items_last: bool,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_amount_precision() -> u32 {
    2
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            cascade_delete_default: false,
            amount_precision: default_amount_precision(),
            shoppable_policy: ShoppablePolicy::default(),
            found_items_last: false,
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &BasketPaths) -> Result<Self, BasketError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BasketError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| BasketError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BasketPaths) -> Result<(), BasketError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BasketError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BasketError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject values the core cannot work with
    pub fn validate(&self) -> Result<(), BasketError> {
        if self.amount_precision > MAX_AMOUNT_PRECISION {
            return Err(BasketError::Config(format!(
                "amount_precision must be at most {}, got {}",
                MAX_AMOUNT_PRECISION, self.amount_precision
            )));
        }
        Ok(())
    }

    /// The core configuration these settings describe
    pub fn basket_config(&self) -> BasketConfig {
        BasketConfig {
            cascade_delete_default: self.cascade_delete_default,
            amount_precision: self.amount_precision,
            shoppable_policy: self.shoppable_policy,
            found_last: self.found_items_last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(!settings.cascade_delete_default);
        assert_eq!(settings.amount_precision, 2);
        assert_eq!(settings.shoppable_policy, ShoppablePolicy::AllItems);
        assert_eq!(settings.basket_config(), BasketConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BasketPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            cascade_delete_default: true,
            shoppable_policy: ShoppablePolicy::FlaggedCategories,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(loaded.cascade_delete_default);
        assert_eq!(loaded.shoppable_policy, ShoppablePolicy::FlaggedCategories);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"found_items_last": true}"#).unwrap();
        assert!(settings.found_items_last);
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_policy_serialized_kebab_case() {
        let settings = Settings {
            shoppable_policy: ShoppablePolicy::FlaggedItems,
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"flagged-items\""));
    }

    #[test]
    fn test_precision_out_of_range() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BasketPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"amount_precision": 40}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, BasketError::Config(_)));
    }
}
