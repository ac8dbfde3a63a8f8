pub mod allocation_service;
pub mod flow_graph_service;
pub mod label_service;
