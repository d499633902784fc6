//! User settings for overhead-cli
//!
//! Display currency, rounding of reported prices, the recompute debounce
//! window and the default pricing rule.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::OverheadPaths;
use crate::error::CostError;
use crate::models::{PricingRule, RoundingRule};

/// User settings for overhead-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown before amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Rounding applied to reported HPP and selling prices
    #[serde(default)]
    pub rounding: RoundingRule,

    /// Quiet period before a watched change triggers a recomputation
    #[serde(default = "default_debounce_ms")]
    pub recompute_debounce_ms: u64,

    /// Pricing rule used when `hpp` gets neither --markup nor --margin
    #[serde(default)]
    pub default_pricing: PricingRule,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "Rp".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            rounding: RoundingRule::default(),
            recompute_debounce_ms: default_debounce_ms(),
            default_pricing: PricingRule::default(),
        }
    }
}

impl Settings {
    /// Debounce window as a `Duration`
    pub fn recompute_debounce(&self) -> Duration {
        Duration::from_millis(self.recompute_debounce_ms)
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &OverheadPaths) -> Result<Self, CostError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| CostError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                CostError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &OverheadPaths) -> Result<(), CostError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| CostError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| CostError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricingMode;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "Rp");
        assert_eq!(settings.rounding, RoundingRule::Unit);
        assert_eq!(settings.recompute_debounce(), Duration::from_millis(300));
        assert_eq!(settings.default_pricing.mode, PricingMode::Markup);
        assert_eq!(settings.default_pricing.percentage, 30.0);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OverheadPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.rounding = RoundingRule::Hundred;
        settings.default_pricing = PricingRule::margin(40.0);
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.rounding, RoundingRule::Hundred);
        assert_eq!(loaded.default_pricing, PricingRule::margin(40.0));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"rounding":"fifty"}"#).unwrap();
        assert_eq!(settings.rounding, RoundingRule::Fifty);
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.recompute_debounce_ms, 300);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OverheadPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, CostError::Config(_)));
    }
}
