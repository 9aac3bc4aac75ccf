use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Presentation and storage configuration.
///
/// Currency and locale only affect how amounts and dates are displayed;
/// stored amounts are plain numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Key under which the ledger snapshot is stored (e.g., "expenses").
    pub storage_key: String,

    /// ISO 4217 code of the display currency (e.g., "SEK").
    pub currency_code: String,

    /// Symbol appended after the amount (e.g., "kr").
    pub currency_symbol: String,

    /// BCP 47 tag of the display locale (e.g., "sv-SE").
    pub locale: String,

    pub decimal_separator: char,

    /// Thousands separator. Defaults to a no-break space.
    pub grouping_separator: char,

    /// `chrono` format string used for the date of each list line.
    pub date_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: "expenses".to_string(),
            currency_code: "SEK".to_string(),
            currency_symbol: "kr".to_string(),
            locale: "sv-SE".to_string(),
            decimal_separator: ',',
            grouping_separator: '\u{a0}',
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidSettings(format!("Failed to parse settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.storage_key.trim().is_empty() {
            return Err(CoreError::InvalidSettings("storage_key must not be empty".into()));
        }
        if self.currency_code.trim().is_empty() {
            return Err(CoreError::InvalidSettings("currency_code must not be empty".into()));
        }
        if self.date_format.trim().is_empty() {
            return Err(CoreError::InvalidSettings("date_format must not be empty".into()));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(CoreError::InvalidSettings(format!(
                "date_format '{}' is not a valid strftime pattern",
                self.date_format
            )));
        }
        Ok(())
    }
}
