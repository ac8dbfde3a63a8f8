use tracing::{debug, warn};
use uuid::Uuid;

use crate::catalog::{defaults, SectorCatalog};
use crate::errors::CoreError;
use crate::models::allocation::{Allocation, AllocationGroup, AllocationKind};
use crate::models::portfolio::PortfolioState;
use crate::models::settings::Settings;

/// Slack allowed when comparing summed percentages against 100.
const PERCENT_EPSILON: f64 = 1e-9;

/// Manages both allocation collections and the totals they are measured against.
///
/// Pure business logic: no I/O. Every operation validates fully before
/// touching state, so a failed call never leaves a partial mutation behind.
pub struct AllocationService {
    enforce_allocation_cap: bool,
    max_borrow_ratio: f64,
}

impl AllocationService {
    pub fn new() -> Self {
        Self::from_settings(&Settings::default())
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            enforce_allocation_cap: settings.enforce_allocation_cap,
            max_borrow_ratio: settings.max_borrow_ratio,
        }
    }

    // ── Totals ──────────────────────────────────────────────────────

    /// Set the total investment and recompute every ordinary amount.
    pub fn set_total_investment(
        &self,
        state: &mut PortfolioState,
        amount: f64,
    ) -> Result<(), CoreError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CoreError::InvalidAmount(amount));
        }
        state.set_total_investment(amount);
        Self::rebase(state, AllocationKind::Ordinary);
        debug!(total_investment = amount, "total investment updated");
        Ok(())
    }

    /// Set the total borrow. Negative or non-finite input is treated as 0.
    /// A zero base clears every borrow allocation.
    pub fn set_total_borrow(&self, state: &mut PortfolioState, amount: f64) {
        let amount = if amount.is_finite() && amount > 0.0 {
            amount
        } else {
            if amount != 0.0 {
                warn!(requested = amount, "invalid total borrow treated as 0");
            }
            0.0
        };

        state.set_total_borrow(amount);
        Self::rebase(state, AllocationKind::Borrow);

        if amount == 0.0 && !state.borrow_allocations().is_empty() {
            let cleared = state.borrow_allocations().len();
            state.collection_mut(AllocationKind::Borrow).clear();
            debug!(cleared, "borrow allocations cleared by zero total borrow");
        }
        debug!(total_borrow = amount, "total borrow updated");
    }

    /// Like `set_total_borrow`, but rejects invalid input and amounts above
    /// `borrow_capacity` instead of clamping.
    pub fn try_set_total_borrow(
        &self,
        state: &mut PortfolioState,
        amount: f64,
    ) -> Result<(), CoreError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CoreError::InvalidAmount(amount));
        }
        let limit = self.borrow_capacity(state);
        if amount > limit {
            return Err(CoreError::BorrowLimitExceeded {
                requested: amount,
                limit,
            });
        }
        self.set_total_borrow(state, amount);
        Ok(())
    }

    /// Maximum total borrow: `max_borrow_ratio` of the lending allocation total.
    #[must_use]
    pub fn borrow_capacity(&self, state: &PortfolioState) -> f64 {
        self.total_allocation_by_type(state, defaults::LENDING) * self.max_borrow_ratio
    }

    // ── Add / remove ────────────────────────────────────────────────

    /// Add an allocation to the collection identified by `kind`.
    /// Returns the created allocation.
    pub fn add(
        &self,
        state: &mut PortfolioState,
        catalog: &SectorCatalog,
        kind: AllocationKind,
        sector_type: &str,
        subsection: &str,
        percentage: f64,
    ) -> Result<Allocation, CoreError> {
        let (st, sub) = catalog.resolve(sector_type, subsection)?;

        if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
            return Err(CoreError::InvalidPercentage(percentage));
        }

        if self.enforce_allocation_cap {
            let current = self.total_percentage(state, kind);
            if current + percentage > 100.0 + PERCENT_EPSILON {
                return Err(CoreError::AllocationLimitExceeded {
                    kind,
                    current,
                    requested: percentage,
                });
            }
        }

        let allocation = Allocation::new(
            st.id.clone(),
            sub.id.clone(),
            sub.name.clone(),
            sub.color,
            percentage,
            state.base_total(kind),
        );
        state.collection_mut(kind).push(allocation.clone());

        debug!(
            %kind,
            id = %allocation.id,
            sector_type,
            subsection,
            percentage,
            amount = allocation.amount(),
            "allocation added"
        );
        Ok(allocation)
    }

    /// Remove an allocation by id. Returns whether anything was removed.
    pub fn remove(&self, state: &mut PortfolioState, kind: AllocationKind, id: Uuid) -> bool {
        let collection = state.collection_mut(kind);
        let before = collection.len();
        collection.retain(|a| a.id != id);
        let removed = collection.len() != before;
        debug!(%kind, %id, removed, "allocation remove requested");
        removed
    }

    // ── Queries ─────────────────────────────────────────────────────

    #[must_use]
    pub fn total_allocation(&self, state: &PortfolioState, kind: AllocationKind) -> f64 {
        state.collection(kind).iter().map(Allocation::amount).sum()
    }

    #[must_use]
    pub fn total_percentage(&self, state: &PortfolioState, kind: AllocationKind) -> f64 {
        state.collection(kind).iter().map(|a| a.percentage).sum()
    }

    /// Summed amount of ordinary allocations of one sector type.
    #[must_use]
    pub fn total_allocation_by_type(&self, state: &PortfolioState, sector_type: &str) -> f64 {
        state
            .allocations()
            .iter()
            .filter(|a| a.sector_type == sector_type)
            .map(Allocation::amount)
            .sum()
    }

    /// Summed percentage of ordinary allocations of one sector type.
    #[must_use]
    pub fn total_percentage_by_type(&self, state: &PortfolioState, sector_type: &str) -> f64 {
        state
            .allocations()
            .iter()
            .filter(|a| a.sector_type == sector_type)
            .map(|a| a.percentage)
            .sum()
    }

    /// Ordinary allocations grouped by sector type, groups in first-seen order.
    pub fn group_by_type<'a>(&self, state: &'a PortfolioState) -> Vec<AllocationGroup<'a>> {
        let mut groups: Vec<AllocationGroup<'a>> = Vec::new();
        for allocation in state.allocations() {
            match groups
                .iter_mut()
                .find(|g| g.sector_type == allocation.sector_type)
            {
                Some(group) => group.allocations.push(allocation),
                None => groups.push(AllocationGroup {
                    sector_type: &allocation.sector_type,
                    allocations: vec![allocation],
                }),
            }
        }
        groups
    }

    /// Percentage of the total investment still unallocated. Borrowed capital
    /// extends the budget by its share of the total investment.
    #[must_use]
    pub fn remaining_percentage(&self, state: &PortfolioState) -> f64 {
        let borrow_share = if state.total_borrow() > 0.0 && state.total_investment() > 0.0 {
            state.total_borrow() / state.total_investment() * 100.0
        } else {
            0.0
        };
        (100.0 + borrow_share) - self.total_percentage(state, AllocationKind::Ordinary)
    }

    #[must_use]
    pub fn remaining_borrow_percentage(&self, state: &PortfolioState) -> f64 {
        100.0 - self.total_percentage(state, AllocationKind::Borrow)
    }

    fn rebase(state: &mut PortfolioState, kind: AllocationKind) {
        let base = state.base_total(kind);
        for allocation in state.collection_mut(kind).iter_mut() {
            allocation.rebase(base);
        }
    }
}

impl Default for AllocationService {
    fn default() -> Self {
        Self::new()
    }
}
