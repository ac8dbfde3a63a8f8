use thiserror::Error;

use crate::models::allocation::AllocationKind;

/// Unified error type for the entire flowfolio-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input validation ────────────────────────────────────────────
    #[error("Invalid amount: {0} (must be a finite number >= 0)")]
    InvalidAmount(f64),

    #[error("Invalid percentage: {0} (must be between 0 and 100)")]
    InvalidPercentage(f64),

    #[error("Unknown sector type: {0}")]
    UnknownSectorType(String),

    #[error("Unknown subsection: {subsection} for sector type: {sector_type}")]
    UnknownSubsection {
        sector_type: String,
        subsection: String,
    },

    // ── Portfolio limits ────────────────────────────────────────────
    #[error(
        "Total {kind} allocation cannot exceed 100% (currently {current}%, requested {requested}%)"
    )]
    AllocationLimitExceeded {
        kind: AllocationKind,
        current: f64,
        requested: f64,
    },

    #[error("Borrow amount {requested} exceeds the allowed limit of {limit}")]
    BorrowLimitExceeded { requested: f64, limit: f64 },

    // ── Catalog ─────────────────────────────────────────────────────
    #[error("Invalid sector catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    // ── Graph ───────────────────────────────────────────────────────
    #[error("Flow graph invariant violated: {0}")]
    InvariantViolation(String),

    // ── Serialization / File ────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
