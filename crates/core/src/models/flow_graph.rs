use serde::Serialize;

use super::color::Color;

/// Id of the root node fed by the total investment.
pub const PORTFOLIO_NODE_ID: &str = "portfolio";

/// Id of the root node fed by the total borrow.
pub const BORROW_NODE_ID: &str = "borrow";

/// Prefix that namespaces borrow category nodes away from ordinary ones.
pub const BORROW_CATEGORY_PREFIX: &str = "borrow-";

/// Layer of a node in the flow graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum NodeDepth {
    /// `portfolio` or `borrow`
    Root,
    /// One node per sector type (ordinary and borrow kept apart)
    Category,
    /// Sector type + subsection
    Subsector,
}

impl NodeDepth {
    pub fn as_u8(self) -> u8 {
        match self {
            NodeDepth::Root => 0,
            NodeDepth::Category => 1,
            NodeDepth::Subsector => 2,
        }
    }
}

impl From<NodeDepth> for u8 {
    fn from(depth: NodeDepth) -> Self {
        depth.as_u8()
    }
}

/// A node in the flow graph.
///
/// Serialized field names follow the Sankey layout input shape so the JSON
/// can be handed to a layout engine as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowNode {
    pub id: String,

    /// Display name
    pub name: String,

    pub color: Color,

    pub depth: NodeDepth,

    /// Whether a label should be rendered for this node
    #[serde(rename = "showLabel")]
    pub label_eligible: bool,

    /// Set on an ordinary subsector node that also receives a borrow flow
    #[serde(rename = "hasBorrowMerge")]
    pub merged_borrow: bool,
}

impl FlowNode {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        color: Color,
        depth: NodeDepth,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
            depth,
            label_eligible: true,
            merged_borrow: false,
        }
    }
}

/// A weighted, directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowEdge {
    pub source: String,
    pub target: String,

    /// Summed amount of every allocation routed through this edge
    #[serde(rename = "value")]
    pub weight: f64,
}

impl FlowEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

/// Layered flow graph snapshot. Rebuilt from portfolio state on every
/// query; never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,

    #[serde(rename = "links")]
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    #[must_use]
    pub fn edge(&self, source: &str, target: &str) -> Option<&FlowEdge> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
    }

    #[must_use]
    pub fn nodes_at_depth(&self, depth: NodeDepth) -> Vec<&FlowNode> {
        self.nodes.iter().filter(|n| n.depth == depth).collect()
    }

    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a FlowEdge> + 'a {
        self.edges.iter().filter(move |e| e.target == id)
    }

    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a FlowEdge> + 'a {
        self.edges.iter().filter(move |e| e.source == id)
    }

    /// Value a Sankey layout assigns to a node: the larger of its total
    /// inflow and total outflow. Unknown ids have value 0.
    #[must_use]
    pub fn node_value(&self, id: &str) -> f64 {
        let inflow: f64 = self.incoming(id).map(|e| e.weight).sum();
        let outflow: f64 = self.outgoing(id).map(|e| e.weight).sum();
        inflow.max(outflow)
    }

    /// Root node a node's flow originates from, found by following the first
    /// incoming edge upward. A leaf that also receives a borrow flow belongs
    /// to the root of its first (ordinary) parent.
    #[must_use]
    pub fn root_of(&self, id: &str) -> Option<&FlowNode> {
        let mut current = self.node(id)?;
        // Every hop moves one layer up, so depth bounds the walk
        for _ in 0..=NodeDepth::Subsector.as_u8() {
            if current.depth == NodeDepth::Root {
                return Some(current);
            }
            let parent = self.incoming(&current.id).next()?;
            current = self.node(&parent.source)?;
        }
        None
    }

    /// Serialize to the `{ nodes, links }` JSON a Sankey layout accepts.
    pub fn to_json(&self) -> Result<String, crate::errors::CoreError> {
        serde_json::to_string_pretty(self).map_err(|e| {
            crate::errors::CoreError::Serialization(format!("Failed to serialize flow graph: {e}"))
        })
    }
}
