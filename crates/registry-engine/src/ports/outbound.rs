//! # Driven Ports (SPI - Outbound)
//!
//! Collaborators the registry service depends on. The host supplies
//! implementations:
//! - Fee transfer (payment or escrow rail)
//! - State persistence

use crate::domain::entities::FeeTransfer;
use crate::domain::snapshot::RegistrySnapshot;
use shared_types::{PaymentError, StorageError};

// =============================================================================
// FEE TRANSFER
// =============================================================================

/// Executes registration-fee transfers.
///
/// Returning `Ok` confirms the transfer happened. Whether a registration waits
/// for that confirmation is decided by the service's settlement policy.
pub trait FeeTransferGateway: Send + Sync {
    /// Move `transfer.amount` from `transfer.from` to `transfer.to`.
    fn transfer(&self, transfer: &FeeTransfer) -> Result<(), PaymentError>;
}

// =============================================================================
// STATE PERSISTENCE
// =============================================================================

/// Stores the registry state between process lifetimes.
///
/// Production: `FileRegistryStore`
/// Testing: `InMemoryRegistryStore`
pub trait RegistryStore: Send + Sync {
    /// Latest saved snapshot, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<RegistrySnapshot>, StorageError>;

    /// Replaces the saved snapshot. Must be all-or-nothing.
    fn save(&self, snapshot: &RegistrySnapshot) -> Result<(), StorageError>;
}
