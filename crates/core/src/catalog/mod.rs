pub mod defaults;
pub mod registry;

pub use registry::SectorCatalog;
