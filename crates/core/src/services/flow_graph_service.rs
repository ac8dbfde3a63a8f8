use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::catalog::{defaults, SectorCatalog};
use crate::errors::CoreError;
use crate::models::allocation::Allocation;
use crate::models::color::Color;
use crate::models::flow_graph::{
    FlowEdge, FlowGraph, FlowNode, NodeDepth, BORROW_CATEGORY_PREFIX, BORROW_NODE_ID,
    PORTFOLIO_NODE_ID,
};
use crate::models::sector::{SectorType, Subsection};

/// Darkening applied to a sector type's base color for its subsector nodes.
pub const SUBSECTOR_DARKEN_INTENSITY: f64 = 0.2;

const PORTFOLIO_NODE_NAME: &str = "Total Portfolio";
const BORROW_NODE_NAME: &str = "Borrow";

/// Turns portfolio allocations into a layered flow graph.
///
/// Layers:
/// - depth 0: `portfolio` (total investment) and `borrow` (total borrow)
/// - depth 1: one category per sector type; borrow categories are
///   namespaced (`borrow-lending`) so they never share a node with
///   ordinary ones
/// - depth 2: `{sector type}-{subsection name}` leaves
///
/// Ordinary leaves are never deduplicated: every ordinary allocation gets
/// its own leaf, and repeats of a key get suffixed ids (`lending-Crypto#2`).
/// A borrow allocation whose key already has an ordinary leaf does not get a
/// node of its own; its edge flows into the first ordinary leaf with that key.
pub struct FlowGraphService;

impl FlowGraphService {
    pub fn new() -> Self {
        Self
    }

    /// Build the graph for the given collections, in insertion order.
    ///
    /// Fails with `InvariantViolation` only if an allocation references a
    /// sector type or subsection the catalog cannot resolve.
    pub fn build(
        &self,
        catalog: &SectorCatalog,
        allocations: &[Allocation],
        borrow_allocations: &[Allocation],
        total_borrow: f64,
    ) -> Result<FlowGraph, CoreError> {
        if allocations.is_empty() && borrow_allocations.is_empty() {
            return Ok(FlowGraph::default());
        }

        let mut graph = GraphAccumulator::default();

        if !allocations.is_empty() {
            graph.add_node(FlowNode::new(
                PORTFOLIO_NODE_ID,
                PORTFOLIO_NODE_NAME,
                defaults::PORTFOLIO_COLOR,
                NodeDepth::Root,
            ));
        }

        let has_borrow_root = total_borrow > 0.0;
        if has_borrow_root {
            let color = catalog
                .get_sector_type("borrow")
                .map_or(defaults::BORROW_COLOR, |t| t.base_color);
            graph.add_node(FlowNode::new(
                BORROW_NODE_ID,
                BORROW_NODE_NAME,
                color,
                NodeDepth::Root,
            ));
        }

        for allocation in allocations {
            let (sector_type, subsection) = resolve(catalog, allocation)?;
            graph.add_ordinary(sector_type, subsection, allocation.amount());
        }

        if has_borrow_root {
            for allocation in borrow_allocations {
                let (sector_type, subsection) = resolve(catalog, allocation)?;
                graph.add_borrow(sector_type, subsection, allocation.amount());
            }
        } else if !borrow_allocations.is_empty() {
            // Validate anyway so malformed input is reported regardless of the base
            for allocation in borrow_allocations {
                resolve(catalog, allocation)?;
            }
            warn!(
                skipped = borrow_allocations.len(),
                "borrow allocations skipped: total borrow is 0"
            );
        }

        let graph = graph.finish();
        debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "flow graph built"
        );
        Ok(graph)
    }
}

impl Default for FlowGraphService {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve<'c>(
    catalog: &'c SectorCatalog,
    allocation: &Allocation,
) -> Result<(&'c SectorType, &'c Subsection), CoreError> {
    catalog
        .resolve(&allocation.sector_type, &allocation.subsection)
        .map_err(|e| {
            CoreError::InvariantViolation(format!(
                "allocation {} is not resolvable: {e}",
                allocation.id
            ))
        })
}

fn subsector_key(sector_type: &SectorType, subsection: &Subsection) -> String {
    format!("{}-{}", sector_type.id, subsection.name)
}

fn subsector_color(sector_type: &SectorType) -> Color {
    sector_type.base_color.darker(SUBSECTOR_DARKEN_INTENSITY)
}

/// Mutable working set used while a graph is built.
#[derive(Default)]
struct GraphAccumulator {
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
    /// Every node id emitted so far
    ids: HashSet<String>,
    /// Category key -> (node index, index of the root -> category edge)
    categories: HashMap<String, (usize, usize)>,
    /// Subsector key -> index of the first node created for it
    seen_subsectors: HashMap<String, usize>,
    /// (source id, target id) -> edge index, for borrow leaf edges
    borrow_edges: HashMap<(String, String), usize>,
}

impl GraphAccumulator {
    /// Push a node, suffixing its id (`#2`, `#3`, ...) if it is already taken.
    /// Returns the node index.
    fn add_node(&mut self, mut node: FlowNode) -> usize {
        if self.ids.contains(&node.id) {
            let base = node.id.clone();
            let mut n = 2;
            while self.ids.contains(&format!("{base}#{n}")) {
                n += 1;
            }
            node.id = format!("{base}#{n}");
        }
        self.ids.insert(node.id.clone());
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn add_edge(&mut self, source: &str, target: &str, weight: f64) -> usize {
        self.edges.push(FlowEdge::new(source, target, weight));
        self.edges.len() - 1
    }

    /// Find or lazily create the category node for `key`, fed from `root`.
    /// Adds `amount` to the root -> category edge and returns the category id.
    fn category(
        &mut self,
        root: &str,
        key: String,
        sector_type: &SectorType,
        amount: f64,
    ) -> String {
        let (node_idx, edge_idx) = match self.categories.get(&key) {
            Some(&entry) => entry,
            None => {
                let node_idx = self.add_node(FlowNode::new(
                    key.clone(),
                    sector_type.name.clone(),
                    sector_type.base_color,
                    NodeDepth::Category,
                ));
                let id = self.nodes[node_idx].id.clone();
                let edge_idx = self.add_edge(root, &id, 0.0);
                self.categories.insert(key, (node_idx, edge_idx));
                (node_idx, edge_idx)
            }
        };
        self.edges[edge_idx].weight += amount;
        self.nodes[node_idx].id.clone()
    }

    fn add_ordinary(&mut self, sector_type: &SectorType, subsection: &Subsection, amount: f64) {
        let category_id =
            self.category(PORTFOLIO_NODE_ID, sector_type.id.clone(), sector_type, amount);

        let key = subsector_key(sector_type, subsection);
        let node_idx = self.add_node(FlowNode::new(
            key.clone(),
            subsection.name.clone(),
            subsector_color(sector_type),
            NodeDepth::Subsector,
        ));
        let leaf_id = self.nodes[node_idx].id.clone();
        self.add_edge(&category_id, &leaf_id, amount);
        self.seen_subsectors.entry(key).or_insert(node_idx);
    }

    fn add_borrow(&mut self, sector_type: &SectorType, subsection: &Subsection, amount: f64) {
        let key = format!("{BORROW_CATEGORY_PREFIX}{}", sector_type.id);
        let category_id = self.category(BORROW_NODE_ID, key, sector_type, amount);

        let subsector = subsector_key(sector_type, subsection);
        let leaf_idx = match self.seen_subsectors.get(&subsector) {
            Some(&idx) => {
                // Flow merges into the existing leaf; no label of its own
                self.nodes[idx].merged_borrow = true;
                idx
            }
            None => {
                let idx = self.add_node(FlowNode::new(
                    subsector.clone(),
                    subsection.name.clone(),
                    subsector_color(sector_type),
                    NodeDepth::Subsector,
                ));
                self.seen_subsectors.insert(subsector, idx);
                idx
            }
        };
        let leaf_id = self.nodes[leaf_idx].id.clone();

        let edge_key = (category_id, leaf_id);
        match self.borrow_edges.get(&edge_key) {
            Some(&idx) => self.edges[idx].weight += amount,
            None => {
                let idx = self.add_edge(&edge_key.0, &edge_key.1, amount);
                self.borrow_edges.insert(edge_key, idx);
            }
        }
    }

    fn finish(self) -> FlowGraph {
        FlowGraph {
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}
