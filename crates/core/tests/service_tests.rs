use flowfolio_core::catalog::SectorCatalog;
use flowfolio_core::errors::CoreError;
use flowfolio_core::models::allocation::AllocationKind;
use flowfolio_core::models::color::Color;
use flowfolio_core::models::flow_graph::{FlowGraph, NodeDepth};
use flowfolio_core::models::label::NodeLabel;
use flowfolio_core::models::portfolio::PortfolioState;
use flowfolio_core::models::sector::{SectorType, Subsection};
use flowfolio_core::models::settings::Settings;
use flowfolio_core::services::allocation_service::AllocationService;
use flowfolio_core::services::flow_graph_service::FlowGraphService;
use flowfolio_core::services::label_service::LabelService;

// ═══════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════

struct Fixture {
    svc: AllocationService,
    state: PortfolioState,
    catalog: SectorCatalog,
}

impl Fixture {
    fn new() -> Self {
        Self {
            svc: AllocationService::new(),
            state: PortfolioState::default(),
            catalog: SectorCatalog::new_with_defaults(),
        }
    }

    fn add(&mut self, sector_type: &str, subsection: &str, percentage: f64) {
        self.svc
            .add(
                &mut self.state,
                &self.catalog,
                AllocationKind::Ordinary,
                sector_type,
                subsection,
                percentage,
            )
            .unwrap();
    }

    fn add_borrow(&mut self, sector_type: &str, subsection: &str, percentage: f64) {
        self.svc
            .add(
                &mut self.state,
                &self.catalog,
                AllocationKind::Borrow,
                sector_type,
                subsection,
                percentage,
            )
            .unwrap();
    }

    fn example() -> Self {
        let mut f = Self::new();
        f.add("lending", "Crypto", 60.0);
        f.add("lending", "Stable", 20.0);
        f.add("hodl", "Crypto", 15.0);
        f.add("custom", "Custom", 5.0);
        f
    }

    fn graph(&self) -> FlowGraph {
        FlowGraphService::new()
            .build(
                &self.catalog,
                self.state.allocations(),
                self.state.borrow_allocations(),
                self.state.total_borrow(),
            )
            .unwrap()
    }
}

fn node_ids(graph: &FlowGraph) -> Vec<&str> {
    graph.nodes.iter().map(|n| n.id.as_str()).collect()
}

fn edge_triples(graph: &FlowGraph) -> Vec<(&str, &str, f64)> {
    graph
        .edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str(), e.weight))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════
// SectorCatalog
// ═══════════════════════════════════════════════════════════════════

mod catalog {
    use super::*;

    #[test]
    fn defaults_in_display_order() {
        let catalog = SectorCatalog::new_with_defaults();
        let ids: Vec<&str> = catalog
            .list_sector_types()
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["borrow", "lp", "lending", "hodl", "custom"]);
    }

    #[test]
    fn default_subsections() {
        let catalog = SectorCatalog::default();
        let lp: Vec<&str> = catalog
            .get_sector_type("lp")
            .unwrap()
            .subsections
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(lp, vec!["Crypto/Crypto", "Crypto/Stable", "Stable/Stable", "Custom"]);
        assert_eq!(catalog.get_sector_type("custom").unwrap().subsections.len(), 1);
    }

    #[test]
    fn default_names_and_colors() {
        let catalog = SectorCatalog::new_with_defaults();
        let lending = catalog.get_sector_type("lending").unwrap();
        assert_eq!(lending.name, "Lending");
        assert_eq!(lending.base_color.to_hex(), "#10b981");
        assert_eq!(
            catalog.get_subsection("lending", "Crypto").unwrap().color.to_hex(),
            "#34d399"
        );
    }

    #[test]
    fn get_subsection_missing() {
        let catalog = SectorCatalog::new_with_defaults();
        assert!(catalog.get_subsection("lending", "Crypto/Crypto").is_none());
        assert!(catalog.get_subsection("nft", "Crypto").is_none());
    }

    #[test]
    fn resolve_unknown_type() {
        let catalog = SectorCatalog::new_with_defaults();
        assert!(matches!(
            catalog.resolve("nft", "Crypto"),
            Err(CoreError::UnknownSectorType(t)) if t == "nft"
        ));
    }

    #[test]
    fn resolve_unknown_subsection() {
        let catalog = SectorCatalog::new_with_defaults();
        match catalog.resolve("custom", "Crypto") {
            Err(CoreError::UnknownSubsection {
                sector_type,
                subsection,
            }) => {
                assert_eq!(sector_type, "custom");
                assert_eq!(subsection, "Crypto");
            }
            other => panic!("Expected UnknownSubsection, got {:?}", other),
        }
    }

    #[test]
    fn custom_catalog() {
        let catalog = SectorCatalog::new(vec![SectorType::new(
            "staking",
            "Staking",
            Color::rgb(1, 2, 3),
            vec![Subsection::named("ETH", Color::rgb(4, 5, 6))],
        )])
        .unwrap();
        assert!(catalog.resolve("staking", "ETH").is_ok());
        assert!(catalog.get_sector_type("lending").is_none());
    }

    #[test]
    fn rejects_duplicate_sector_type() {
        let t = SectorType::new("lp", "LP", Color::rgb(0, 0, 0), vec![]);
        assert!(matches!(
            SectorCatalog::new(vec![t.clone(), t]),
            Err(CoreError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn rejects_duplicate_subsection() {
        let t = SectorType::new(
            "lp",
            "LP",
            Color::rgb(0, 0, 0),
            vec![
                Subsection::named("Custom", Color::rgb(0, 0, 0)),
                Subsection::named("Custom", Color::rgb(1, 1, 1)),
            ],
        );
        let err = SectorCatalog::new(vec![t]).unwrap_err();
        assert!(err.to_string().contains("duplicate subsection 'Custom'"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// AllocationService
// ═══════════════════════════════════════════════════════════════════

mod allocation_service {
    use super::*;

    #[test]
    fn add_computes_amount_and_resolves_display_fields() {
        let mut f = Fixture::new();
        let a = f
            .svc
            .add(&mut f.state, &f.catalog, AllocationKind::Ordinary, "lending", "Crypto", 60.0)
            .unwrap();
        assert_eq!(a.amount(), 6_000.0);
        assert_eq!(a.name, "Crypto");
        assert_eq!(a.color.to_hex(), "#34d399");
        assert_eq!(f.state.allocations().len(), 1);
        assert_eq!(f.state.allocations()[0], a);
    }

    #[test]
    fn zero_percent_is_allowed() {
        let mut f = Fixture::new();
        f.add("hodl", "Stable", 0.0);
        assert_eq!(f.state.allocations()[0].amount(), 0.0);
    }

    #[test]
    fn rejects_out_of_range_percentage() {
        let mut f = Fixture::new();
        for bad in [-1.0, 100.5, f64::NAN, f64::INFINITY] {
            let err = f
                .svc
                .add(&mut f.state, &f.catalog, AllocationKind::Ordinary, "hodl", "Crypto", bad)
                .unwrap_err();
            assert!(matches!(err, CoreError::InvalidPercentage(_)));
        }
        assert!(f.state.allocations().is_empty());
    }

    #[test]
    fn rejects_unknown_pair() {
        let mut f = Fixture::new();
        let err = f
            .svc
            .add(&mut f.state, &f.catalog, AllocationKind::Ordinary, "bogus", "Crypto", 10.0)
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownSectorType(_)));
        assert!(f.state.allocations().is_empty());
    }

    #[test]
    fn cap_rejects_over_100() {
        let mut f = Fixture::example();
        let err = f
            .svc
            .add(&mut f.state, &f.catalog, AllocationKind::Ordinary, "hodl", "Stable", 1.0)
            .unwrap_err();
        match err {
            CoreError::AllocationLimitExceeded {
                kind,
                current,
                requested,
            } => {
                assert_eq!(kind, AllocationKind::Ordinary);
                assert_eq!(current, 100.0);
                assert_eq!(requested, 1.0);
            }
            other => panic!("Expected AllocationLimitExceeded, got {:?}", other),
        }
        assert_eq!(f.state.allocations().len(), 4);
    }

    #[test]
    fn cap_tolerates_float_noise_at_100() {
        let mut f = Fixture::new();
        f.add("hodl", "Crypto", 70.1);
        f.add("hodl", "Stable", 29.9);
        f.add("hodl", "Custom", 0.0);
        assert_eq!(f.state.allocations().len(), 3);
    }

    #[test]
    fn cap_can_be_disabled() {
        let settings = Settings {
            enforce_allocation_cap: false,
            ..Settings::default()
        };
        let svc = AllocationService::from_settings(&settings);
        let catalog = SectorCatalog::new_with_defaults();
        let mut state = PortfolioState::default();
        for _ in 0..3 {
            svc.add(&mut state, &catalog, AllocationKind::Ordinary, "lending", "Crypto", 60.0)
                .unwrap();
        }
        assert_eq!(svc.total_percentage(&state, AllocationKind::Ordinary), 180.0);
    }

    #[test]
    fn cap_is_per_collection() {
        let mut f = Fixture::example();
        f.svc.set_total_borrow(&mut f.state, 1_000.0);
        f.add_borrow("lending", "Crypto", 100.0);
        assert_eq!(f.svc.total_percentage(&f.state, AllocationKind::Borrow), 100.0);
    }

    #[test]
    fn remove_by_id() {
        let mut f = Fixture::example();
        let id = f.state.allocations()[1].id;
        assert!(f.svc.remove(&mut f.state, AllocationKind::Ordinary, id));
        assert_eq!(f.state.allocations().len(), 3);
        assert!(!f.svc.remove(&mut f.state, AllocationKind::Ordinary, id));
    }

    #[test]
    fn remove_only_touches_its_collection() {
        let mut f = Fixture::example();
        f.svc.set_total_borrow(&mut f.state, 500.0);
        f.add_borrow("hodl", "Crypto", 50.0);
        let ordinary_id = f.state.allocations()[0].id;
        assert!(!f.svc.remove(&mut f.state, AllocationKind::Borrow, ordinary_id));
        assert_eq!(f.state.allocations().len(), 4);
    }

    #[test]
    fn set_total_investment_rebases() {
        let mut f = Fixture::example();
        f.svc.set_total_investment(&mut f.state, 20_000.0).unwrap();
        let amounts: Vec<f64> = f.state.allocations().iter().map(|a| a.amount()).collect();
        assert_eq!(amounts, vec![12_000.0, 4_000.0, 3_000.0, 1_000.0]);
        assert_eq!(f.svc.total_allocation(&f.state, AllocationKind::Ordinary), 20_000.0);
    }

    #[test]
    fn set_total_investment_rejects_invalid() {
        let mut f = Fixture::example();
        assert!(matches!(
            f.svc.set_total_investment(&mut f.state, -5.0),
            Err(CoreError::InvalidAmount(_))
        ));
        assert!(f.svc.set_total_investment(&mut f.state, f64::NAN).is_err());
        assert_eq!(f.state.total_investment(), 10_000.0);
    }

    #[test]
    fn set_total_borrow_rebases_borrow_only() {
        let mut f = Fixture::example();
        f.svc.set_total_borrow(&mut f.state, 1_000.0);
        f.add_borrow("hodl", "Stable", 40.0);
        f.svc.set_total_borrow(&mut f.state, 2_000.0);
        assert_eq!(f.state.borrow_allocations()[0].amount(), 800.0);
        assert_eq!(f.state.allocations()[0].amount(), 6_000.0);
    }

    #[test]
    fn zero_total_borrow_clears_borrow_allocations() {
        let mut f = Fixture::example();
        f.svc.set_total_borrow(&mut f.state, 1_000.0);
        f.add_borrow("hodl", "Stable", 40.0);
        f.svc.set_total_borrow(&mut f.state, 0.0);
        assert!(f.state.borrow_allocations().is_empty());
        assert_eq!(f.state.allocations().len(), 4);
    }

    #[test]
    fn invalid_total_borrow_is_treated_as_zero() {
        let mut f = Fixture::new();
        f.svc.set_total_borrow(&mut f.state, 1_000.0);
        f.add_borrow("hodl", "Stable", 40.0);
        f.svc.set_total_borrow(&mut f.state, -3.0);
        assert_eq!(f.state.total_borrow(), 0.0);
        assert!(f.state.borrow_allocations().is_empty());
    }

    #[test]
    fn borrow_capacity_is_share_of_lending() {
        let f = Fixture::example();
        let capacity = f.svc.borrow_capacity(&f.state);
        assert!((capacity - 6_400.0).abs() < 1e-6);
    }

    #[test]
    fn try_set_total_borrow_enforces_capacity() {
        let mut f = Fixture::example();
        let err = f.svc.try_set_total_borrow(&mut f.state, 7_000.0).unwrap_err();
        assert!(matches!(
            err,
            CoreError::BorrowLimitExceeded { requested, .. } if requested == 7_000.0
        ));
        assert_eq!(f.state.total_borrow(), 0.0);

        f.svc.try_set_total_borrow(&mut f.state, 5_000.0).unwrap();
        assert_eq!(f.state.total_borrow(), 5_000.0);
    }

    #[test]
    fn try_set_total_borrow_rejects_negative() {
        let mut f = Fixture::example();
        assert!(matches!(
            f.svc.try_set_total_borrow(&mut f.state, -1.0),
            Err(CoreError::InvalidAmount(_))
        ));
    }

    #[test]
    fn totals_by_type() {
        let f = Fixture::example();
        assert_eq!(f.svc.total_allocation_by_type(&f.state, "lending"), 8_000.0);
        assert_eq!(f.svc.total_percentage_by_type(&f.state, "lending"), 80.0);
        assert_eq!(f.svc.total_allocation_by_type(&f.state, "lp"), 0.0);
    }

    #[test]
    fn group_by_type_in_first_seen_order() {
        let mut f = Fixture::new();
        f.add("hodl", "Crypto", 10.0);
        f.add("lending", "Crypto", 10.0);
        f.add("hodl", "Stable", 10.0);
        let groups = f.svc.group_by_type(&f.state);
        let summary: Vec<(&str, usize)> = groups
            .iter()
            .map(|g| (g.sector_type, g.allocations.len()))
            .collect();
        assert_eq!(summary, vec![("hodl", 2), ("lending", 1)]);
    }

    #[test]
    fn remaining_percentage_includes_borrow_headroom() {
        let mut f = Fixture::example();
        assert_eq!(f.svc.remaining_percentage(&f.state), 0.0);
        f.svc.set_total_borrow(&mut f.state, 1_000.0);
        assert!((f.svc.remaining_percentage(&f.state) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn remaining_percentage_with_zero_investment() {
        let mut f = Fixture::new();
        f.svc.set_total_investment(&mut f.state, 0.0).unwrap();
        f.svc.set_total_borrow(&mut f.state, 1_000.0);
        assert_eq!(f.svc.remaining_percentage(&f.state), 100.0);
    }

    #[test]
    fn remaining_borrow_percentage() {
        let mut f = Fixture::new();
        f.svc.set_total_borrow(&mut f.state, 1_000.0);
        f.add_borrow("lending", "Stable", 30.0);
        assert_eq!(f.svc.remaining_borrow_percentage(&f.state), 70.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// FlowGraphService
// ═══════════════════════════════════════════════════════════════════

mod flow_graph_service {
    use super::*;

    #[test]
    fn empty_state_gives_empty_graph() {
        let f = Fixture::new();
        assert!(f.graph().is_empty());
        assert!(f.graph().edges.is_empty());
    }

    #[test]
    fn example_graph_layout() {
        let graph = Fixture::example().graph();
        assert_eq!(
            node_ids(&graph),
            vec![
                "portfolio",
                "lending",
                "lending-Crypto",
                "lending-Stable",
                "hodl",
                "hodl-Crypto",
                "custom",
                "custom-Custom",
            ]
        );
        assert_eq!(
            edge_triples(&graph),
            vec![
                ("portfolio", "lending", 8_000.0),
                ("lending", "lending-Crypto", 6_000.0),
                ("lending", "lending-Stable", 2_000.0),
                ("portfolio", "hodl", 1_500.0),
                ("hodl", "hodl-Crypto", 1_500.0),
                ("portfolio", "custom", 500.0),
                ("custom", "custom-Custom", 500.0),
            ]
        );
    }

    #[test]
    fn node_attributes() {
        let graph = Fixture::example().graph();
        let root = graph.node("portfolio").unwrap();
        assert_eq!(root.name, "Total Portfolio");
        assert_eq!(root.depth, NodeDepth::Root);
        assert_eq!(root.color.to_hex(), "#6366f1");

        let category = graph.node("lending").unwrap();
        assert_eq!(category.name, "Lending");
        assert_eq!(category.depth, NodeDepth::Category);
        assert_eq!(category.color.to_hex(), "#10b981");

        let leaf = graph.node("lending-Crypto").unwrap();
        assert_eq!(leaf.name, "Crypto");
        assert_eq!(leaf.depth, NodeDepth::Subsector);
        assert_eq!(leaf.color.to_hex(), "#0fac78");
        assert!(leaf.label_eligible);
        assert!(!leaf.merged_borrow);

        assert_eq!(graph.node("hodl-Crypto").unwrap().color.to_hex(), "#e4930a");
    }

    #[test]
    fn category_edge_equals_sum_of_leaf_edges() {
        let graph = Fixture::example().graph();
        for category in graph.nodes_at_depth(NodeDepth::Category) {
            let inflow: f64 = graph.incoming(&category.id).map(|e| e.weight).sum();
            let outflow: f64 = graph.outgoing(&category.id).map(|e| e.weight).sum();
            assert!((inflow - outflow).abs() < 1e-9, "{}", category.id);
        }
    }

    #[test]
    fn duplicate_ordinary_pairs_get_distinct_leaves() {
        let mut f = Fixture::new();
        f.add("lending", "Crypto", 30.0);
        f.add("lending", "Crypto", 20.0);
        let graph = f.graph();
        assert_eq!(
            node_ids(&graph),
            vec!["portfolio", "lending", "lending-Crypto", "lending-Crypto#2"]
        );
        assert_eq!(graph.edge("portfolio", "lending").unwrap().weight, 5_000.0);
        assert_eq!(graph.edge("lending", "lending-Crypto").unwrap().weight, 3_000.0);
        assert_eq!(graph.edge("lending", "lending-Crypto#2").unwrap().weight, 2_000.0);
    }

    #[test]
    fn borrow_merges_into_existing_leaf() {
        let mut f = Fixture::new();
        f.add("lending", "Crypto", 50.0);
        f.svc.set_total_borrow(&mut f.state, 300.0);
        f.add_borrow("lending", "Crypto", 100.0);
        let graph = f.graph();

        assert_eq!(
            node_ids(&graph),
            vec!["portfolio", "borrow", "lending", "lending-Crypto", "borrow-lending"]
        );
        assert_eq!(
            edge_triples(&graph),
            vec![
                ("portfolio", "lending", 5_000.0),
                ("lending", "lending-Crypto", 5_000.0),
                ("borrow", "borrow-lending", 300.0),
                ("borrow-lending", "lending-Crypto", 300.0),
            ]
        );

        let leaf = graph.node("lending-Crypto").unwrap();
        assert!(leaf.merged_borrow);
        assert!(leaf.label_eligible);
        assert_eq!(graph.node_value("lending-Crypto"), 5_300.0);
    }

    #[test]
    fn borrow_root_uses_borrow_type_color() {
        let mut f = Fixture::new();
        f.svc.set_total_borrow(&mut f.state, 300.0);
        f.add_borrow("hodl", "Crypto", 100.0);
        let graph = f.graph();
        let root = graph.node("borrow").unwrap();
        assert_eq!(root.name, "Borrow");
        assert_eq!(root.color.to_hex(), "#ef4444");
    }

    #[test]
    fn borrow_only_graph_has_no_portfolio_root() {
        let mut f = Fixture::new();
        f.svc.set_total_borrow(&mut f.state, 1_000.0);
        f.add_borrow("hodl", "Stable", 60.0);
        f.add_borrow("lp", "Crypto/Stable", 40.0);
        let graph = f.graph();

        assert!(graph.node("portfolio").is_none());
        assert_eq!(
            node_ids(&graph),
            vec!["borrow", "borrow-hodl", "hodl-Stable", "borrow-lp", "lp-Crypto/Stable"]
        );
        assert_eq!(graph.edge("borrow", "borrow-hodl").unwrap().weight, 600.0);
        assert_eq!(graph.edge("borrow-lp", "lp-Crypto/Stable").unwrap().weight, 400.0);
        assert!(graph.node("hodl-Stable").unwrap().label_eligible);
    }

    #[test]
    fn repeated_borrow_pairs_accumulate() {
        let mut f = Fixture::new();
        f.svc.set_total_borrow(&mut f.state, 1_000.0);
        f.add_borrow("hodl", "Stable", 30.0);
        f.add_borrow("hodl", "Stable", 20.0);
        let graph = f.graph();

        assert_eq!(node_ids(&graph), vec!["borrow", "borrow-hodl", "hodl-Stable"]);
        assert_eq!(
            edge_triples(&graph),
            vec![
                ("borrow", "borrow-hodl", 500.0),
                ("borrow-hodl", "hodl-Stable", 500.0),
            ]
        );
    }

    #[test]
    fn ordinary_borrow_type_does_not_collide_with_borrow_root() {
        let mut f = Fixture::new();
        f.add("borrow", "Crypto", 10.0);
        f.svc.set_total_borrow(&mut f.state, 100.0);
        f.add_borrow("hodl", "Crypto", 100.0);
        let graph = f.graph();

        assert_eq!(graph.node("borrow").unwrap().depth, NodeDepth::Root);
        let category = graph.node("borrow#2").unwrap();
        assert_eq!(category.depth, NodeDepth::Category);
        assert_eq!(graph.edge("portfolio", "borrow#2").unwrap().weight, 1_000.0);
        assert_eq!(graph.edge("borrow#2", "borrow-Crypto").unwrap().weight, 1_000.0);
    }

    #[test]
    fn node_ids_are_unique() {
        let mut f = Fixture::new();
        f.add("lending", "Crypto", 10.0);
        f.add("lending", "Crypto", 10.0);
        f.add("lending", "Crypto", 10.0);
        f.add("borrow", "Stable", 10.0);
        f.svc.set_total_borrow(&mut f.state, 100.0);
        f.add_borrow("lending", "Crypto", 50.0);
        f.add_borrow("lending", "Stable", 50.0);
        let graph = f.graph();

        let mut ids = node_ids(&graph);
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
        for edge in &graph.edges {
            assert!(graph.node(&edge.source).is_some());
            assert!(graph.node(&edge.target).is_some());
        }
    }

    #[test]
    fn borrow_allocations_skipped_without_total_borrow() {
        let mut f = Fixture::example();
        // Base is 0, so the allocation is accepted with a zero amount
        f.add_borrow("hodl", "Stable", 50.0);
        let graph = f.graph();
        assert!(graph.node("borrow").is_none());
        assert!(graph.node("borrow-hodl").is_none());
        assert_eq!(graph.nodes.len(), 8);
    }

    #[test]
    fn unresolvable_allocation_is_an_invariant_violation() {
        let f = Fixture::example();
        let restricted = SectorCatalog::new(vec![SectorType::new(
            "lending",
            "Lending",
            Color::rgb(0x10, 0xb9, 0x81),
            vec![
                Subsection::named("Crypto", Color::rgb(0x34, 0xd3, 0x99)),
                Subsection::named("Stable", Color::rgb(0x6e, 0xe7, 0xb7)),
            ],
        )])
        .unwrap();
        let err = FlowGraphService::new()
            .build(
                &restricted,
                f.state.allocations(),
                f.state.borrow_allocations(),
                f.state.total_borrow(),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::InvariantViolation(_)));
    }

    #[test]
    fn build_is_deterministic() {
        let mut f = Fixture::example();
        f.svc.set_total_borrow(&mut f.state, 1_000.0);
        f.add_borrow("lending", "Crypto", 70.0);
        f.add_borrow("lp", "Stable/Stable", 30.0);
        assert_eq!(f.graph(), f.graph());
    }
}

// ═══════════════════════════════════════════════════════════════════
// LabelService
// ═══════════════════════════════════════════════════════════════════

mod label_service {
    use super::*;

    #[test]
    fn example_labels() {
        let graph = Fixture::example().graph();
        let labels = LabelService::default().labels(&graph);
        assert_eq!(labels.len(), 8);

        let root = &labels[0];
        assert_eq!(root.node_id, "portfolio");
        assert_eq!(root.title, "TOTAL PORTFOLIO");
        assert_eq!(root.detail, "$10,000 (100%)");

        let lending = labels.iter().find(|l| l.node_id == "lending").unwrap();
        assert_eq!(lending.title, "LENDING");
        assert_eq!(lending.detail, "$8,000 (80%)");
        assert_eq!(lending.ratio, 80.0);

        let custom = labels.iter().find(|l| l.node_id == "custom").unwrap();
        assert_eq!(custom.title, "CUSTOM STRATEGY");
        assert_eq!(custom.detail, "$500 (5%)");
    }

    #[test]
    fn merged_leaf_label_includes_borrow_flow() {
        let mut f = Fixture::new();
        f.add("lending", "Crypto", 50.0);
        f.svc.set_total_borrow(&mut f.state, 300.0);
        f.add_borrow("lending", "Crypto", 100.0);
        let labels = LabelService::default().labels(&f.graph());

        let leaf = labels.iter().find(|l| l.node_id == "lending-Crypto").unwrap();
        assert_eq!(leaf.value, 5_300.0);
        assert_eq!(leaf.detail, "$5,300 (106%)");

        let borrow_category = labels.iter().find(|l| l.node_id == "borrow-lending").unwrap();
        assert_eq!(borrow_category.detail, "$300 (100%)");

        let borrow_root = labels.iter().find(|l| l.node_id == "borrow").unwrap();
        assert_eq!(borrow_root.detail, "$300 (100%)");
    }

    #[test]
    fn hidden_subsectors_are_skipped() {
        let mut graph = Fixture::example().graph();
        for node in graph.nodes.iter_mut() {
            node.label_eligible = false;
        }
        let labels = LabelService::default().labels(&graph);
        let ids: Vec<&str> = labels.iter().map(|l| l.node_id.as_str()).collect();
        assert_eq!(ids, vec!["portfolio", "lending", "hodl", "custom"]);
    }

    #[test]
    fn currency_is_applied() {
        let graph = Fixture::example().graph();
        let labels = LabelService::new("EUR").labels(&graph);
        assert_eq!(labels[0].detail, "10,000 € (100%)");
    }

    #[test]
    fn empty_graph_has_no_labels() {
        assert!(LabelService::default().labels(&FlowGraph::default()).is_empty());
    }

    fn detail_of<'a>(labels: &'a [NodeLabel], id: &str) -> &'a str {
        &labels.iter().find(|l| l.node_id == id).unwrap().detail
    }

    #[test]
    fn ordinary_borrow_type_is_measured_against_portfolio() {
        let mut f = Fixture::new();
        f.add("lending", "Crypto", 90.0);
        f.add("borrow", "Crypto", 10.0);
        let labels = LabelService::default().labels(&f.graph());

        // Without a borrow root the ordinary category owns the plain id
        assert_eq!(detail_of(&labels, "borrow"), "$1,000 (10%)");
        assert_eq!(detail_of(&labels, "borrow-Crypto"), "$1,000 (10%)");
    }

    #[test]
    fn ratios_follow_the_owning_root() {
        let mut f = Fixture::new();
        f.add("lending", "Crypto", 90.0);
        f.add("borrow", "Crypto", 10.0);
        f.svc.set_total_borrow(&mut f.state, 5_000.0);
        f.add_borrow("hodl", "Stable", 100.0);
        let labels = LabelService::default().labels(&f.graph());

        assert_eq!(detail_of(&labels, "portfolio"), "$10,000 (100%)");
        assert_eq!(detail_of(&labels, "borrow"), "$5,000 (100%)");
        assert_eq!(detail_of(&labels, "borrow#2"), "$1,000 (10%)");
        assert_eq!(detail_of(&labels, "borrow-Crypto"), "$1,000 (10%)");
        assert_eq!(detail_of(&labels, "borrow-hodl"), "$5,000 (100%)");
        assert_eq!(detail_of(&labels, "hodl-Stable"), "$5,000 (100%)");
    }
}
