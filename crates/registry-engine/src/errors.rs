//! # Error Types
//!
//! All error types for the property registry.
//!
//! Domain failures carry a stable numeric code so callers can branch on the
//! cause without matching on message text.

use crate::domain::invariants::InvariantViolation;
use shared_types::{PaymentError, StorageError};
use thiserror::Error;

// =============================================================================
// REGISTRY ERRORS
// =============================================================================

/// Deterministic failures of a registry operation.
///
/// Every failure leaves the registry state untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Caller is not permitted to perform the operation.
    #[error("not authorized")]
    NotAuthorized,

    /// Total token supply must be positive.
    #[error("invalid total tokens")]
    InvalidTotalTokens,

    /// Legal-document hash must be exactly 32 bytes.
    #[error("invalid legal hash: expected 32 bytes, got {0}")]
    InvalidLegalHash(usize),

    /// Location empty or longer than 100 characters.
    #[error("invalid location")]
    InvalidLocation,

    /// Description empty or longer than 500 characters.
    #[error("invalid description")]
    InvalidDescription,

    /// Property value must be positive.
    #[error("invalid value")]
    InvalidValue,

    /// Another property already occupies the location.
    #[error("property already exists at location {0:?}")]
    PropertyAlreadyExists(String),

    /// No property with the given id.
    #[error("property not found: {0}")]
    PropertyNotFound(u64),

    /// The authority contract has already been set.
    #[error("authority contract already configured")]
    AlreadyConfigured,

    /// Registration requires a configured authority contract.
    #[error("authority contract not configured")]
    AuthorityNotVerified,

    /// Currency not one of STX, USD, BTC.
    #[error("invalid currency: {0:?}")]
    InvalidCurrency(String),

    /// Registry holds `max` properties already.
    #[error("capacity exceeded: max {max} properties")]
    CapacityExceeded { max: u64 },

    /// Property type not one of beach, mountain, urban.
    #[error("invalid property type: {0:?}")]
    InvalidPropertyType(String),

    /// Capacity outside 1..=20.
    #[error("invalid capacity: {0}")]
    InvalidCapacity(u32),

    /// Amenities longer than 200 characters.
    #[error("invalid amenities")]
    InvalidAmenities,

    /// A prepared registration no longer matches the state it was validated against.
    #[error("stale registration: prepared id {prepared}, next id {next}")]
    StaleRegistration { prepared: u64, next: u64 },
}

impl RegistryError {
    /// Stable numeric code for this failure.
    #[must_use]
    pub const fn code(&self) -> u32 {
        match self {
            Self::NotAuthorized => codes::NOT_AUTHORIZED,
            Self::InvalidTotalTokens => codes::INVALID_TOTAL_TOKENS,
            Self::InvalidLegalHash(_) => codes::INVALID_LEGAL_HASH,
            Self::InvalidLocation => codes::INVALID_LOCATION,
            Self::InvalidDescription => codes::INVALID_DESCRIPTION,
            Self::InvalidValue => codes::INVALID_VALUE,
            Self::PropertyAlreadyExists(_) => codes::PROPERTY_ALREADY_EXISTS,
            Self::PropertyNotFound(_) => codes::PROPERTY_NOT_FOUND,
            Self::AlreadyConfigured => codes::ALREADY_CONFIGURED,
            Self::AuthorityNotVerified => codes::AUTHORITY_NOT_VERIFIED,
            Self::InvalidCurrency(_) => codes::INVALID_CURRENCY,
            Self::StaleRegistration { .. } => codes::STALE_REGISTRATION,
            Self::CapacityExceeded { .. } => codes::CAPACITY_EXCEEDED,
            Self::InvalidPropertyType(_) => codes::INVALID_PROPERTY_TYPE,
            Self::InvalidCapacity(_) => codes::INVALID_CAPACITY,
            Self::InvalidAmenities => codes::INVALID_AMENITIES,
        }
    }
}

/// Numeric failure codes.
#[allow(missing_docs)]
pub mod codes {
    pub const NOT_AUTHORIZED: u32 = 100;
    pub const INVALID_TOTAL_TOKENS: u32 = 101;
    pub const INVALID_LEGAL_HASH: u32 = 102;
    pub const INVALID_LOCATION: u32 = 103;
    pub const INVALID_DESCRIPTION: u32 = 104;
    pub const INVALID_VALUE: u32 = 105;
    pub const PROPERTY_ALREADY_EXISTS: u32 = 106;
    pub const PROPERTY_NOT_FOUND: u32 = 107;
    pub const ALREADY_CONFIGURED: u32 = 108;
    pub const AUTHORITY_NOT_VERIFIED: u32 = 109;
    pub const INVALID_CURRENCY: u32 = 110;
    pub const STALE_REGISTRATION: u32 = 113;
    pub const CAPACITY_EXCEEDED: u32 = 114;
    pub const INVALID_PROPERTY_TYPE: u32 = 115;
    pub const INVALID_CAPACITY: u32 = 116;
    pub const INVALID_AMENITIES: u32 = 117;

    /// Fee transfer was not confirmed by the payment collaborator.
    pub const PAYMENT_FAILED: u32 = 200;
    /// State could not be flushed to or loaded from storage.
    pub const STORAGE_FAILED: u32 = 201;
    /// Persisted snapshot violates registry invariants.
    pub const CORRUPT_SNAPSHOT: u32 = 202;
}

// =============================================================================
// SNAPSHOT ERRORS
// =============================================================================

/// A persisted snapshot that cannot be reloaded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("snapshot violates {} invariant(s): {}", .violations.len(), format_violations(.violations))]
pub struct SnapshotError {
    /// Every invariant the snapshot breaks.
    pub violations: Vec<InvariantViolation>,
}

fn format_violations(violations: &[InvariantViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// SERVICE ERRORS
// =============================================================================

/// Errors surfaced by [`crate::service::PropertyRegistryService`].
#[derive(Debug, Error, Clone)]
pub enum ServiceError {
    /// The operation was rejected by the registry rules.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The registration fee was not transferred.
    #[error("fee transfer failed: {0}")]
    Payment(#[from] PaymentError),

    /// State could not be persisted; nothing was committed.
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),

    /// Persisted state failed validation on load.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl ServiceError {
    /// Stable numeric code; domain failures keep their registry code.
    #[must_use]
    pub const fn code(&self) -> u32 {
        match self {
            Self::Registry(err) => err.code(),
            Self::Payment(_) => codes::PAYMENT_FAILED,
            Self::Storage(_) => codes::STORAGE_FAILED,
            Self::Snapshot(_) => codes::CORRUPT_SNAPSHOT,
        }
    }

    /// Returns the registry failure, if this is one.
    #[must_use]
    pub const fn as_registry(&self) -> Option<&RegistryError> {
        match self {
            Self::Registry(err) => Some(err),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
