pub mod allocation;
pub mod color;
pub mod flow_graph;
pub mod label;
pub mod portfolio;
pub mod scenario;
pub mod sector;
pub mod settings;
