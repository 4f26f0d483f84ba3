//! # Registry Engine - Tokenized Property Registry
//!
//! ## Purpose
//!
//! Records tokenized real-estate listings under a single fee-receiving
//! authority. Enforces field-level validity, location uniqueness, owner-only
//! updates and a capacity ceiling, and describes the registration fee owed
//! to the authority for the host to settle.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Location index is the exact inverse of stored locations | `domain/index.rs` - `PropertyBook::insert()`, `PropertyBook::relocate()` |
//! | `next_property_id` counts every registration, never decreases | `domain/state.rs` - `RegistryState::commit_registration()` |
//! | Authority is write-once | `domain/state.rs` - `RegistryState::set_authority_contract()` |
//! | Update records reference stored properties | `domain/state.rs` - `RegistryState::update_property()` |
//! | Legal hash is exactly 32 bytes | `domain/value_objects.rs` - `LegalHash` |
//! | All of the above, for reloaded state | `domain/invariants.rs` - `check_all_invariants()` |
//!
//! ## Registration Pipeline
//!
//! Checks run in this order and stop at the first failure:
//!
//! | Step | Check | Error |
//! |------|-------|-------|
//! | 1 | `next_property_id < max_properties` | `CapacityExceeded` |
//! | 2 | location 1..=100 chars | `InvalidLocation` |
//! | 3 | description 1..=500 chars | `InvalidDescription` |
//! | 4 | legal hash 32 bytes | `InvalidLegalHash` |
//! | 5 | total tokens > 0 | `InvalidTotalTokens` |
//! | 6 | value > 0 | `InvalidValue` |
//! | 7 | currency STX / USD / BTC | `InvalidCurrency` |
//! | 8 | type beach / mountain / urban | `InvalidPropertyType` |
//! | 9 | capacity 1..=20 | `InvalidCapacity` |
//! | 10 | amenities <= 200 chars | `InvalidAmenities` |
//! | 11 | location unused | `PropertyAlreadyExists` |
//! | 12 | authority configured | `AuthorityNotVerified` |
//!
//! ## Outbound Dependencies
//!
//! | Collaborator | Trait | Purpose |
//! |--------------|-------|---------|
//! | Payment rail | `FeeTransferGateway` | Move the registration fee to the authority |
//! | Persistence | `RegistryStore` | Flush and reload registry state |
//!
//! ## Usage Example
//!
//! ```ignore
//! use registry_engine::prelude::*;
//!
//! let service = create_test_service();
//! let ctx = CallContext::new(Principal::new("ST1TEST")?, 1);
//! service.set_authority_contract(&ctx, Principal::new("ST2TEST")?)?;
//! let id = service.register_property(&ctx, request)?;
//! assert!(service.verify_property(id));
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        FeeTransfer, Property, PropertyUpdate, RegisterPropertyRequest, Registration,
    };

    // Value objects
    pub use crate::domain::value_objects::{Currency, LegalHash, PropertyId, PropertyType};

    // State machine
    pub use crate::domain::index::PropertyBook;
    pub use crate::domain::snapshot::RegistrySnapshot;
    pub use crate::domain::state::{PendingRegistration, RegistryState};
    pub use crate::domain::validation::limits;

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, InvariantCheckResult, InvariantViolation,
    };

    // Ports
    pub use crate::ports::inbound::PropertyRegistryApi;
    pub use crate::ports::outbound::{FeeTransferGateway, RegistryStore};

    // Errors
    pub use crate::errors::{codes, RegistryError, ServiceError, SnapshotError};

    // Adapters
    pub use crate::adapters::{FileRegistryStore, InMemoryRegistryStore, RecordingFeeGateway};

    // Service
    pub use crate::service::{
        create_test_service, FeeSettlement, PropertyRegistryService, ServiceConfig, ServiceStats,
    };

    // Shared primitives
    pub use shared_types::{
        BlockHeight, CallContext, InvalidPrincipal, PaymentError, Principal, StorageError,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Component name.
pub const COMPONENT_NAME: &str = "Registry Engine";

// =============================================================================
// TESTS
// =============================================================================
