use crate::format::format_currency_in;
use crate::models::flow_graph::{FlowGraph, FlowNode, NodeDepth};
use crate::models::label::NodeLabel;

/// Names longer than this are truncated.
const MAX_TITLE_CHARS: usize = 15;
/// Characters kept when a name is truncated (before the `...`).
const TRUNCATED_TITLE_CHARS: usize = 12;

/// Computes label text for the nodes of a flow graph.
pub struct LabelService {
    currency: String,
}

impl LabelService {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    /// Labels for every visible node, in node order.
    ///
    /// Roots and categories are always labeled; subsector nodes only when
    /// label-eligible. Roots show 100%; every other node's share is measured
    /// against the root its flow comes from (see `FlowGraph::root_of`).
    pub fn labels(&self, graph: &FlowGraph) -> Vec<NodeLabel> {
        graph
            .nodes
            .iter()
            .filter(|n| is_visible(n))
            .map(|node| {
                let value = graph.node_value(&node.id);
                let share = match node.depth {
                    NodeDepth::Root => 100.0,
                    _ => value / reference_total(graph, &node.id) * 100.0,
                };
                let ratio = share.round();

                NodeLabel {
                    node_id: node.id.clone(),
                    title: title(&node.name),
                    detail: format!("{} ({ratio:.0}%)", format_currency_in(value, &self.currency)),
                    value,
                    ratio,
                }
            })
            .collect()
    }
}

impl Default for LabelService {
    fn default() -> Self {
        Self::new("USD")
    }
}

fn is_visible(node: &FlowNode) -> bool {
    match node.depth {
        NodeDepth::Root | NodeDepth::Category => true,
        NodeDepth::Subsector => node.label_eligible,
    }
}

/// Value of the root `id` descends from, used as a ratio denominator.
/// 1 when the root is missing or empty.
fn reference_total(graph: &FlowGraph, id: &str) -> f64 {
    let value = graph.root_of(id).map_or(0.0, |root| graph.node_value(&root.id));
    if value > 0.0 {
        value
    } else {
        1.0
    }
}

/// Upper-cased display name, truncated to 12 chars + `...` past 15 chars.
pub fn title(name: &str) -> String {
    let upper = name.to_uppercase();
    if upper.chars().count() > MAX_TITLE_CHARS {
        let head: String = upper.chars().take(TRUNCATED_TITLE_CHARS).collect();
        format!("{head}...")
    } else {
        upper
    }
}
