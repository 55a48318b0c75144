//! User settings for the expense tracker
//!
//! Display preferences plus the calendar policy the week filter uses.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::models::{FilterMode, WeekStart};

/// User settings, persisted as `config.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// First day of week (0 = Sunday, 1 = Monday, ... 6 = Saturday)
    #[serde(default)]
    pub first_day_of_week: u8,

    /// Window applied when no filter is given on the command line
    #[serde(default)]
    pub default_filter: FilterMode,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            first_day_of_week: 0,
            default_filter: FilterMode::default(),
        }
    }
}

impl Settings {
    /// The configured week start
    ///
    /// # Errors
    ///
    /// Returns a config error if `first_day_of_week` is not in 0..=6.
    pub fn week_start(&self) -> Result<WeekStart, ExpenseError> {
        WeekStart::from_index(self.first_day_of_week).ok_or_else(|| {
            ExpenseError::Config(format!(
                "first_day_of_week must be between 0 (Sunday) and 6 (Saturday), got {}",
                self.first_day_of_week
            ))
        })
    }

    /// Check values that serde can't
    pub fn validate(&self) -> Result<(), ExpenseError> {
        self.week_start()?;

        let bad_format =
            StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error));
        if bad_format || self.date_format.trim().is_empty() {
            return Err(ExpenseError::Config(format!(
                "date_format '{}' is not a valid strftime format",
                self.date_format
            )));
        }

        Ok(())
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExpenseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExpenseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
