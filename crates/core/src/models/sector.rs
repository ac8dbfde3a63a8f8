use serde::{Deserialize, Serialize};

use super::color::Color;

/// A refinement under a sector type (e.g., "Crypto", "Stable", "Crypto/Crypto").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    /// Lookup key, as referenced by allocations
    pub id: String,

    /// Human-readable name, also used to key subsector nodes in the flow graph
    pub name: String,

    pub color: Color,
}

impl Subsection {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: Color) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
        }
    }

    /// A subsection whose id doubles as its display name.
    pub fn named(name: impl Into<String>, color: Color) -> Self {
        let name = name.into();
        Self::new(name.clone(), name, color)
    }
}

/// A top-level allocation category (borrow, lp, lending, hodl, custom).
///
/// Subsections keep their declaration order so cascading selectors list
/// them consistently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorType {
    pub id: String,
    pub name: String,
    pub base_color: Color,
    pub subsections: Vec<Subsection>,
}

impl SectorType {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        base_color: Color,
        subsections: Vec<Subsection>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_color,
            subsections,
        }
    }

    #[must_use]
    pub fn subsection(&self, id: &str) -> Option<&Subsection> {
        self.subsections.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn has_subsection(&self, id: &str) -> bool {
        self.subsection(id).is_some()
    }
}
