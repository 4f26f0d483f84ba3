//! # In-Memory Store
//!
//! `RegistryStore` kept in process memory, for tests and ephemeral hosts.

use crate::domain::snapshot::RegistrySnapshot;
use crate::ports::outbound::RegistryStore;
use parking_lot::Mutex;
use shared_types::StorageError;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// In-memory implementation of `RegistryStore`.
#[derive(Debug, Default)]
pub struct InMemoryRegistryStore {
    snapshot: Mutex<Option<RegistrySnapshot>>,
    unavailable: AtomicBool,
    saves: AtomicU64,
}

impl InMemoryRegistryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `snapshot`.
    #[must_use]
    pub fn with_snapshot(snapshot: RegistrySnapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
            ..Self::default()
        }
    }

    /// Makes subsequent saves fail with `StorageError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> u64 {
        self.saves.load(Ordering::SeqCst)
    }

    /// The currently held snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<RegistrySnapshot> {
        self.snapshot.lock().clone()
    }
}

impl RegistryStore for InMemoryRegistryStore {
    fn load(&self) -> Result<Option<RegistrySnapshot>, StorageError> {
        Ok(self.snapshot.lock().clone())
    }

    fn save(&self, snapshot: &RegistrySnapshot) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("in-memory store offline".to_string()));
        }
        *self.snapshot.lock() = Some(snapshot.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
