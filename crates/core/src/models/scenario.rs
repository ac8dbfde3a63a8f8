use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::portfolio::{PortfolioState, DEFAULT_TOTAL_INVESTMENT};

/// One allocation request inside a scenario document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationEntry {
    pub sector_type: String,
    pub subsection: String,
    pub percentage: f64,
}

impl AllocationEntry {
    pub fn new(
        sector_type: impl Into<String>,
        subsection: impl Into<String>,
        percentage: f64,
    ) -> Self {
        Self {
            sector_type: sector_type.into(),
            subsection: subsection.into(),
            percentage,
        }
    }
}

/// A complete portfolio description: both totals and both allocation lists.
///
/// Applying a scenario replays every entry through the validated add
/// operations, so a scenario can never produce state the store would reject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Scenario {
    pub total_investment: f64,
    pub total_borrow: f64,
    pub allocations: Vec<AllocationEntry>,
    pub borrow_allocations: Vec<AllocationEntry>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            total_investment: DEFAULT_TOTAL_INVESTMENT,
            total_borrow: 0.0,
            allocations: Vec::new(),
            borrow_allocations: Vec::new(),
        }
    }
}

impl Scenario {
    /// The example 10k portfolio a new user is shown.
    pub fn example() -> Self {
        Self {
            allocations: vec![
                AllocationEntry::new("lending", "Crypto", 60.0),
                AllocationEntry::new("lending", "Stable", 20.0),
                AllocationEntry::new("hodl", "Crypto", 15.0),
                AllocationEntry::new("custom", "Custom", 5.0),
            ],
            ..Self::default()
        }
    }

    /// Capture the current state as a scenario (ids and amounts are dropped).
    pub fn from_state(state: &PortfolioState) -> Self {
        let entries = |allocations: &[crate::models::allocation::Allocation]| {
            allocations
                .iter()
                .map(|a| {
                    AllocationEntry::new(a.sector_type.clone(), a.subsection.clone(), a.percentage)
                })
                .collect()
        };
        Self {
            total_investment: state.total_investment(),
            total_borrow: state.total_borrow(),
            allocations: entries(state.allocations()),
            borrow_allocations: entries(state.borrow_allocations()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize scenario: {e}")))
    }

    /// Load a scenario from a JSON file on disk.
    pub fn load_from_file(path: &str) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
