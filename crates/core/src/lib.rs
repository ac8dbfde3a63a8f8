pub mod catalog;
pub mod errors;
pub mod format;
pub mod models;
pub mod services;

use tracing::{debug, warn};
use uuid::Uuid;

use catalog::SectorCatalog;
use errors::CoreError;
use models::{
    allocation::{Allocation, AllocationGroup, AllocationKind},
    flow_graph::FlowGraph,
    label::NodeLabel,
    portfolio::PortfolioState,
    scenario::Scenario,
    sector::SectorType,
    settings::Settings,
};
use services::{
    allocation_service::AllocationService, flow_graph_service::FlowGraphService,
    label_service::LabelService,
};

/// Main entry point for the Flowfolio core library.
/// Holds the portfolio state, the sector catalog, and the services that
/// operate on them.
#[must_use]
pub struct PortfolioPlanner {
    state: PortfolioState,
    catalog: SectorCatalog,
    settings: Settings,
    allocation_service: AllocationService,
    flow_graph_service: FlowGraphService,
    label_service: LabelService,
}

impl std::fmt::Debug for PortfolioPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioPlanner")
            .field("total_investment", &self.state.total_investment())
            .field("total_borrow", &self.state.total_borrow())
            .field("allocations", &self.state.allocations().len())
            .field("borrow_allocations", &self.state.borrow_allocations().len())
            .field("settings", &self.settings)
            .finish()
    }
}

impl PortfolioPlanner {
    /// Create an empty planner with default settings and the default catalog.
    pub fn create_new() -> Self {
        Self::build(SectorCatalog::new_with_defaults(), Settings::default())
    }

    /// Create an empty planner with the given catalog and settings.
    pub fn with_catalog(catalog: SectorCatalog, settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::build(catalog, settings))
    }

    /// Create a planner pre-filled with the example 10k portfolio.
    pub fn with_example_portfolio() -> Result<Self, CoreError> {
        let mut planner = Self::create_new();
        planner.apply_scenario(&Scenario::example())?;
        Ok(planner)
    }

    // ── Totals ──────────────────────────────────────────────────────

    /// Set the total investment. Recomputes every ordinary allocation amount.
    pub fn set_total_investment(&mut self, amount: f64) -> Result<(), CoreError> {
        self.allocation_service.set_total_investment(&mut self.state, amount)
    }

    #[must_use]
    pub fn get_total_investment(&self) -> f64 {
        self.state.total_investment()
    }

    /// Set the total borrow. Negative or non-finite amounts are treated as 0;
    /// a zero total clears all borrow allocations.
    pub fn set_total_borrow(&mut self, amount: f64) {
        self.allocation_service.set_total_borrow(&mut self.state, amount);
    }

    /// Set the total borrow, rejecting amounts above `get_borrow_capacity`.
    pub fn try_set_total_borrow(&mut self, amount: f64) -> Result<(), CoreError> {
        self.allocation_service.try_set_total_borrow(&mut self.state, amount)
    }

    #[must_use]
    pub fn get_total_borrow(&self) -> f64 {
        self.state.total_borrow()
    }

    /// Maximum total borrow allowed by the lending allocation and settings.
    #[must_use]
    pub fn get_borrow_capacity(&self) -> f64 {
        self.allocation_service.borrow_capacity(&self.state)
    }

    // ── Ordinary allocations ────────────────────────────────────────

    /// Add an allocation of the total investment.
    pub fn add_allocation(
        &mut self,
        sector_type: &str,
        subsection: &str,
        percentage: f64,
    ) -> Result<Allocation, CoreError> {
        self.allocation_service.add(
            &mut self.state,
            &self.catalog,
            AllocationKind::Ordinary,
            sector_type,
            subsection,
            percentage,
        )
    }

    /// Remove an allocation by id. Returns whether anything was removed.
    pub fn remove_allocation(&mut self, id: Uuid) -> bool {
        self.allocation_service.remove(&mut self.state, AllocationKind::Ordinary, id)
    }

    #[must_use]
    pub fn get_allocations(&self) -> &[Allocation] {
        self.state.allocations()
    }

    #[must_use]
    pub fn get_allocation(&self, id: Uuid) -> Option<&Allocation> {
        self.state.allocations().iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn get_total_allocation(&self) -> f64 {
        self.allocation_service.total_allocation(&self.state, AllocationKind::Ordinary)
    }

    #[must_use]
    pub fn get_total_percentage(&self) -> f64 {
        self.allocation_service.total_percentage(&self.state, AllocationKind::Ordinary)
    }

    #[must_use]
    pub fn get_total_allocation_by_type(&self, sector_type: &str) -> f64 {
        self.allocation_service.total_allocation_by_type(&self.state, sector_type)
    }

    #[must_use]
    pub fn get_total_percentage_by_type(&self, sector_type: &str) -> f64 {
        self.allocation_service.total_percentage_by_type(&self.state, sector_type)
    }

    /// Ordinary allocations grouped by sector type, in first-seen order.
    #[must_use]
    pub fn get_allocations_by_type(&self) -> Vec<AllocationGroup<'_>> {
        self.allocation_service.group_by_type(&self.state)
    }

    /// Unallocated percentage, including the headroom borrowed capital adds.
    #[must_use]
    pub fn get_remaining_percentage(&self) -> f64 {
        self.allocation_service.remaining_percentage(&self.state)
    }

    // ── Borrow allocations ──────────────────────────────────────────

    /// Add an allocation of the total borrow.
    pub fn add_borrow_allocation(
        &mut self,
        sector_type: &str,
        subsection: &str,
        percentage: f64,
    ) -> Result<Allocation, CoreError> {
        self.allocation_service.add(
            &mut self.state,
            &self.catalog,
            AllocationKind::Borrow,
            sector_type,
            subsection,
            percentage,
        )
    }

    /// Remove a borrow allocation by id. Returns whether anything was removed.
    pub fn remove_borrow_allocation(&mut self, id: Uuid) -> bool {
        self.allocation_service.remove(&mut self.state, AllocationKind::Borrow, id)
    }

    #[must_use]
    pub fn get_borrow_allocations(&self) -> &[Allocation] {
        self.state.borrow_allocations()
    }

    #[must_use]
    pub fn get_total_borrow_allocation(&self) -> f64 {
        self.allocation_service.total_allocation(&self.state, AllocationKind::Borrow)
    }

    #[must_use]
    pub fn get_total_borrow_percentage(&self) -> f64 {
        self.allocation_service.total_percentage(&self.state, AllocationKind::Borrow)
    }

    #[must_use]
    pub fn get_remaining_borrow_percentage(&self) -> f64 {
        self.allocation_service.remaining_borrow_percentage(&self.state)
    }

    // ── Flow graph ──────────────────────────────────────────────────

    /// Rebuild the flow graph from the current state.
    pub fn build_flow_graph(&self) -> Result<FlowGraph, CoreError> {
        self.flow_graph_service.build(
            &self.catalog,
            self.state.allocations(),
            self.state.borrow_allocations(),
            self.state.total_borrow(),
        )
    }

    /// Label text for every visible node of the current flow graph.
    pub fn get_node_labels(&self) -> Result<Vec<NodeLabel>, CoreError> {
        let graph = self.build_flow_graph()?;
        Ok(self.label_service.labels(&graph))
    }

    // ── Catalog & settings ──────────────────────────────────────────

    #[must_use]
    pub fn get_sector_types(&self) -> &[SectorType] {
        self.catalog.list_sector_types()
    }

    #[must_use]
    pub fn get_sector_type(&self, id: &str) -> Option<&SectorType> {
        self.catalog.get_sector_type(id)
    }

    #[must_use]
    pub fn get_catalog(&self) -> &SectorCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn get_state(&self) -> &PortfolioState {
        &self.state
    }

    // ── Scenarios ───────────────────────────────────────────────────

    /// Replace the current state with a scenario.
    ///
    /// Every entry is validated against a scratch state first; the planner
    /// is only updated if the whole scenario applies cleanly. Borrow entries
    /// are dropped when the scenario's total borrow is 0.
    pub fn apply_scenario(&mut self, scenario: &Scenario) -> Result<(), CoreError> {
        let mut scratch = PortfolioState::default();
        let svc = &self.allocation_service;

        svc.set_total_investment(&mut scratch, scenario.total_investment)?;
        if !scenario.total_borrow.is_finite() || scenario.total_borrow < 0.0 {
            return Err(CoreError::InvalidAmount(scenario.total_borrow));
        }
        svc.set_total_borrow(&mut scratch, scenario.total_borrow);

        for entry in &scenario.allocations {
            svc.add(
                &mut scratch,
                &self.catalog,
                AllocationKind::Ordinary,
                &entry.sector_type,
                &entry.subsection,
                entry.percentage,
            )?;
        }
        for entry in &scenario.borrow_allocations {
            svc.add(
                &mut scratch,
                &self.catalog,
                AllocationKind::Borrow,
                &entry.sector_type,
                &entry.subsection,
                entry.percentage,
            )?;
        }
        if scratch.total_borrow() == 0.0 && !scratch.borrow_allocations().is_empty() {
            // Validated above, but there is no borrow base to measure them against
            warn!(
                dropped = scratch.borrow_allocations().len(),
                "scenario borrow allocations dropped: total borrow is 0"
            );
            svc.set_total_borrow(&mut scratch, 0.0);
        }

        debug!(
            allocations = scratch.allocations().len(),
            borrow_allocations = scratch.borrow_allocations().len(),
            "scenario applied"
        );
        self.state = scratch;
        Ok(())
    }

    /// Import a scenario from JSON, replacing the current state.
    pub fn import_scenario_from_json(&mut self, json: &str) -> Result<(), CoreError> {
        let scenario = Scenario::from_json(json)?;
        self.apply_scenario(&scenario)
    }

    /// Export the current state as a scenario JSON document.
    pub fn export_scenario_to_json(&self) -> Result<String, CoreError> {
        Scenario::from_state(&self.state).to_json()
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(catalog: SectorCatalog, settings: Settings) -> Self {
        let state = PortfolioState::with_total_investment(settings.default_total_investment);
        let allocation_service = AllocationService::from_settings(&settings);
        let flow_graph_service = FlowGraphService::new();
        let label_service = LabelService::new(settings.currency.clone());

        Self {
            state,
            catalog,
            settings,
            allocation_service,
            flow_graph_service,
            label_service,
        }
    }
}
