use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::portfolio::DEFAULT_TOTAL_INVESTMENT;

/// User-configurable settings for a planner.
///
/// Every field has a default, so a partial JSON document (or `{}`) loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Total investment a fresh planner starts with.
    pub default_total_investment: f64,

    /// Share of the lending allocation total that may be borrowed against
    /// when the checked borrow setter is used (e.g., 0.80 = 80%).
    pub max_borrow_ratio: f64,

    /// Reject additions that would push a collection above 100%.
    pub enforce_allocation_cap: bool,

    /// Display currency code for formatted amounts.
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_total_investment: DEFAULT_TOTAL_INVESTMENT,
            max_borrow_ratio: 0.80,
            enforce_allocation_cap: true,
            currency: "USD".to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file on disk.
    pub fn load_from_file(path: &str) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.default_total_investment.is_finite() || self.default_total_investment < 0.0 {
            return Err(CoreError::InvalidAmount(self.default_total_investment));
        }
        if !self.max_borrow_ratio.is_finite() || self.max_borrow_ratio < 0.0 {
            return Err(CoreError::InvalidAmount(self.max_borrow_ratio));
        }
        Ok(())
    }
}
