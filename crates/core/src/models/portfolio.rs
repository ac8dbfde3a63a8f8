use serde::Serialize;

use super::allocation::{Allocation, AllocationKind};

/// Total investment used when no other amount has been set.
pub const DEFAULT_TOTAL_INVESTMENT: f64 = 10_000.0;

/// The main data container: both totals and both allocation collections.
///
/// Fields are private so every mutation goes through `AllocationService`,
/// which keeps derived amounts in step with the totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioState {
    total_investment: f64,
    total_borrow: f64,
    allocations: Vec<Allocation>,
    borrow_allocations: Vec<Allocation>,
}

impl Default for PortfolioState {
    fn default() -> Self {
        Self::with_total_investment(DEFAULT_TOTAL_INVESTMENT)
    }
}

impl PortfolioState {
    pub fn with_total_investment(total_investment: f64) -> Self {
        Self {
            total_investment,
            total_borrow: 0.0,
            allocations: Vec::new(),
            borrow_allocations: Vec::new(),
        }
    }

    #[must_use]
    pub fn total_investment(&self) -> f64 {
        self.total_investment
    }

    #[must_use]
    pub fn total_borrow(&self) -> f64 {
        self.total_borrow
    }

    /// Ordinary allocations, in insertion order.
    #[must_use]
    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    /// Borrow allocations, in insertion order.
    #[must_use]
    pub fn borrow_allocations(&self) -> &[Allocation] {
        &self.borrow_allocations
    }

    #[must_use]
    pub fn collection(&self, kind: AllocationKind) -> &[Allocation] {
        match kind {
            AllocationKind::Ordinary => &self.allocations,
            AllocationKind::Borrow => &self.borrow_allocations,
        }
    }

    /// The total a collection's percentages are measured against.
    #[must_use]
    pub fn base_total(&self, kind: AllocationKind) -> f64 {
        match kind {
            AllocationKind::Ordinary => self.total_investment,
            AllocationKind::Borrow => self.total_borrow,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty() && self.borrow_allocations.is_empty()
    }

    pub(crate) fn collection_mut(&mut self, kind: AllocationKind) -> &mut Vec<Allocation> {
        match kind {
            AllocationKind::Ordinary => &mut self.allocations,
            AllocationKind::Borrow => &mut self.borrow_allocations,
        }
    }

    pub(crate) fn set_total_investment(&mut self, amount: f64) {
        self.total_investment = amount;
    }

    pub(crate) fn set_total_borrow(&mut self, amount: f64) {
        self.total_borrow = amount;
    }
}
