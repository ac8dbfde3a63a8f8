use std::collections::HashSet;

use tracing::debug;

use crate::errors::CoreError;
use crate::models::sector::{SectorType, Subsection};

use super::defaults;

/// Read-only registry of sector types and their subsections.
///
/// Built once and injected wherever allocations are validated or graphs are
/// built. There is no mutation API; alternate catalogs are constructed with
/// `SectorCatalog::new`.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorCatalog {
    sector_types: Vec<SectorType>,
}

impl SectorCatalog {
    /// Create a catalog from sector types, in display order.
    /// Rejects duplicate sector type ids and duplicate subsection ids within a type.
    pub fn new(sector_types: Vec<SectorType>) -> Result<Self, CoreError> {
        let mut seen_types = HashSet::new();
        for sector_type in &sector_types {
            if !seen_types.insert(sector_type.id.as_str()) {
                return Err(CoreError::InvalidCatalog(format!(
                    "duplicate sector type '{}'",
                    sector_type.id
                )));
            }

            let mut seen_subsections = HashSet::new();
            for subsection in &sector_type.subsections {
                if !seen_subsections.insert(subsection.id.as_str()) {
                    return Err(CoreError::InvalidCatalog(format!(
                        "duplicate subsection '{}' in sector type '{}'",
                        subsection.id, sector_type.id
                    )));
                }
            }
        }

        debug!(sector_types = sector_types.len(), "sector catalog created");
        Ok(Self { sector_types })
    }

    /// The fixed catalog: borrow, lp, lending, hodl, custom.
    pub fn new_with_defaults() -> Self {
        Self {
            sector_types: defaults::sector_types(),
        }
    }

    #[must_use]
    pub fn get_sector_type(&self, id: &str) -> Option<&SectorType> {
        self.sector_types.iter().find(|t| t.id == id)
    }

    /// All sector types, in catalog order.
    #[must_use]
    pub fn list_sector_types(&self) -> &[SectorType] {
        &self.sector_types
    }

    #[must_use]
    pub fn get_subsection(&self, sector_type: &str, subsection: &str) -> Option<&Subsection> {
        self.get_sector_type(sector_type)?.subsection(subsection)
    }

    /// Resolve a (sector type, subsection) pair, failing with the matching
    /// `UnknownSectorType` / `UnknownSubsection` error.
    pub fn resolve(
        &self,
        sector_type: &str,
        subsection: &str,
    ) -> Result<(&SectorType, &Subsection), CoreError> {
        let st = self
            .get_sector_type(sector_type)
            .ok_or_else(|| CoreError::UnknownSectorType(sector_type.to_string()))?;
        let sub = st
            .subsection(subsection)
            .ok_or_else(|| CoreError::UnknownSubsection {
                sector_type: sector_type.to_string(),
                subsection: subsection.to_string(),
            })?;
        Ok((st, sub))
    }
}

impl Default for SectorCatalog {
    fn default() -> Self {
        Self::new_with_defaults()
    }
}
