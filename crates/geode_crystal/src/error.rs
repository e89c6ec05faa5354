//! # Crystal Error Types
//!
//! Validation failures for crystal calculation and mesh generation.

use thiserror::Error;

use geode_core::StoreError;

/// Errors raised by crystal calculation.
#[derive(Error, Debug)]
pub enum CrystalError {
    /// A facet count the sphere distribution cannot express.
    #[error("degenerate facet count {0}: at least 2 facets are required")]
    DegenerateFacetCount(u32),

    /// A color that is not a #rrggbb hex string.
    #[error("malformed hex color {0:?}")]
    InvalidColor(String),

    /// A storage collaborator failed; propagated unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for crystal operations.
pub type CrystalResult<T> = Result<T, CrystalError>;
