use serde::Serialize;

/// Display text for one labeled node.
///
/// The core computes the text; the frontend only places it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLabel {
    pub node_id: String,

    /// Upper-cased, truncated display name (first line)
    pub title: String,

    /// Formatted value and share of its root, e.g. "$6,000 (60%)"
    pub detail: String,

    /// Node value as computed by the flow graph
    pub value: f64,

    /// Share of the reference root total, rounded to a whole percent
    pub ratio: f64,
}
