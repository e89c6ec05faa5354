//! # Storage Collaborators
//!
//! Traits the core uses to reach the external record store, plus in-memory
//! implementations for tests and headless harnesses.
//!
//! The core does not wrap or retry storage failures; a [`StoreError`]
//! propagates unchanged to the caller.

use thiserror::Error;

use crate::element::PlacedElement;
use crate::map::MapConfig;

/// Errors surfaced by storage collaborators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The singleton map configuration has never been written.
    #[error("map configuration has not been initialised")]
    MissingMapConfig,

    /// A record lookup by id found nothing.
    #[error("record not found: {0}")]
    NotFound(u64),

    /// The store rejected a write (e.g. an invalid map configuration).
    #[error("rejected write: {0}")]
    Rejected(String),

    /// Backend failure, opaque to the core.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Reader/writer for the singleton map configuration.
///
/// Deliberately has no delete operation: exactly one configuration exists
/// and removing it is forbidden.
pub trait MapConfigStore {
    /// Loads the current configuration.
    ///
    /// # Errors
    ///
    /// [`StoreError::MissingMapConfig`] when nothing has been written yet.
    fn load(&self) -> StoreResult<MapConfig>;

    /// Replaces the configuration. Implementations re-validate dimensions
    /// and reject invalid writes.
    ///
    /// # Errors
    ///
    /// [`StoreError::Rejected`] for invalid configurations, or a backend
    /// failure.
    fn save(&mut self, config: MapConfig) -> StoreResult<()>;
}

/// Store of placed-element records.
pub trait PlacedElementStore {
    /// Persists a record, assigning and returning its id.
    ///
    /// # Errors
    ///
    /// Backend failures only; the core validates before writing.
    fn insert(&mut self, element: PlacedElement) -> StoreResult<u64>;

    /// Deletes every record, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Backend failures only.
    fn delete_all(&mut self) -> StoreResult<usize>;

    /// Returns every record, in insertion order.
    ///
    /// # Errors
    ///
    /// Backend failures only.
    fn all(&self) -> StoreResult<Vec<PlacedElement>>;

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Backend failures only.
    fn len(&self) -> StoreResult<usize> {
        Ok(self.all()?.len())
    }
}

/// In-memory map configuration store.
#[derive(Clone, Debug, Default)]
pub struct MemoryMapConfigStore {
    config: Option<MapConfig>,
}

impl MemoryMapConfigStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a configuration.
    #[must_use]
    pub fn with_config(config: MapConfig) -> Self {
        Self {
            config: Some(config),
        }
    }
}

impl MapConfigStore for MemoryMapConfigStore {
    fn load(&self) -> StoreResult<MapConfig> {
        self.config.clone().ok_or(StoreError::MissingMapConfig)
    }

    fn save(&mut self, config: MapConfig) -> StoreResult<()> {
        config
            .validate()
            .map_err(|e| StoreError::Rejected(e.to_string()))?;
        self.config = Some(config);
        Ok(())
    }
}

/// In-memory placed-element store with monotonically increasing ids.
#[derive(Clone, Debug, Default)]
pub struct MemoryPlacedElementStore {
    elements: Vec<PlacedElement>,
    next_id: u64,
}

impl MemoryPlacedElementStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlacedElementStore for MemoryPlacedElementStore {
    fn insert(&mut self, mut element: PlacedElement) -> StoreResult<u64> {
        self.next_id += 1;
        element.id = self.next_id;
        self.elements.push(element);
        Ok(self.next_id)
    }

    fn delete_all(&mut self) -> StoreResult<usize> {
        let removed = self.elements.len();
        self.elements.clear();
        Ok(removed)
    }

    fn all(&self) -> StoreResult<Vec<PlacedElement>> {
        Ok(self.elements.clone())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.elements.len())
    }
}
