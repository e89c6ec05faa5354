//! # World Generation Error Types
//!
//! Validation and storage failures surfaced by a generation run.
//!
//! An empty catalog is NOT an error: the run reports `success: false` with
//! a message instead. Placement retry exhaustion is a soft miss and never
//! appears here either.

use thiserror::Error;

use geode_core::{CoreError, StoreError};

/// Errors that can abort a generation run.
#[derive(Error, Debug)]
pub enum WorldGenError {
    /// Invalid input surfaced by the shared model (density, biome, map
    /// dimensions).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage collaborator failed; propagated unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for world generation operations.
pub type WorldGenResult<T> = Result<T, WorldGenError>;
