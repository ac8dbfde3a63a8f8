use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::color::Color;

/// Which collection an allocation belongs to, and therefore which total
/// its percentage is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationKind {
    /// A slice of the total investment
    Ordinary,
    /// A slice of the total borrowed capital
    Borrow,
}

impl std::fmt::Display for AllocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationKind::Ordinary => write!(f, "ordinary"),
            AllocationKind::Borrow => write!(f, "borrow"),
        }
    }
}

/// A percentage slice assigned to one sector type / subsection pair.
///
/// `amount` is derived from `percentage` and the owning base total. It is
/// only ever written by the store, which recomputes it whenever the base
/// changes, so it can never drift from the percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    pub id: Uuid,

    /// Sector type id (e.g., "lending")
    pub sector_type: String,

    /// Subsection id within the sector type (e.g., "Crypto")
    pub subsection: String,

    /// Resolved subsection display name
    pub name: String,

    /// Resolved subsection color
    pub color: Color,

    /// Share of the base total, in [0, 100]
    pub percentage: f64,

    pub(crate) amount: f64,
}

impl Allocation {
    pub(crate) fn new(
        sector_type: impl Into<String>,
        subsection: impl Into<String>,
        name: impl Into<String>,
        color: Color,
        percentage: f64,
        base_total: f64,
    ) -> Self {
        Self {
            id: crate::format::generate_id(),
            sector_type: sector_type.into(),
            subsection: subsection.into(),
            name: name.into(),
            color,
            percentage,
            amount: amount_of(percentage, base_total),
        }
    }

    /// Amount of capital this allocation represents against its current base.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub(crate) fn rebase(&mut self, base_total: f64) {
        self.amount = amount_of(self.percentage, base_total);
    }
}

fn amount_of(percentage: f64, base_total: f64) -> f64 {
    (percentage / 100.0) * base_total
}

/// Ordinary allocations of one sector type, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationGroup<'a> {
    pub sector_type: &'a str,
    pub allocations: Vec<&'a Allocation>,
}
