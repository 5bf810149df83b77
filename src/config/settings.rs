//! User settings for the budget ledger
//!
//! Currency, spend cost policy, hierarchy depth limit and display
//! preferences. Every field has a serde default so older files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::engine::DEFAULT_MAX_DEPTH;
use crate::error::LedgerError;
use crate::models::{Currency, SpendCostPolicy, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// ISO currency code used for display and precision checks
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Which spend costs are accepted
    #[serde(default)]
    pub spend_cost_policy: SpendCostPolicy,

    /// Maximum number of parent hops in the spend type hierarchy
    #[serde(default = "default_max_spend_type_depth")]
    pub max_spend_type_depth: usize,

    /// Default log filter when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_max_spend_type_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: default_currency(),
            spend_cost_policy: SpendCostPolicy::default(),
            max_spend_type_depth: default_max_spend_type_depth(),
            log_level: default_log_level(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Resolve the configured currency
    pub fn currency(&self) -> Result<Currency, ValidationError> {
        self.currency.parse()
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.currency().map_err(|e| LedgerError::Config(e.to_string()))?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
