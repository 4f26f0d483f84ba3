//! # Core Domain Entities
//!
//! Property records, their update trail, and the fee-transfer effect a
//! registration produces.

use crate::domain::value_objects::{Currency, LegalHash, PropertyId, PropertyType};
use serde::{Deserialize, Serialize};
use shared_types::{BlockHeight, Principal};

// =============================================================================
// PROPERTY
// =============================================================================

/// A registered listing.
///
/// Created once by registration; afterwards only `location`, `description`
/// and `timestamp` change, and only through an owner update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Registering identity. Never transferable.
    pub owner: Principal,
    /// Unique location, 1..=100 characters.
    pub location: String,
    /// Free-form description, 1..=500 characters.
    pub description: String,
    /// Hash of the backing legal document.
    pub legal_hash: LegalHash,
    /// Token supply representing the property.
    pub total_tokens: u64,
    /// Height of registration, or of the latest update.
    pub timestamp: BlockHeight,
    /// Appraised value in `currency`.
    pub value: u64,
    /// Denomination of `value`.
    pub currency: Currency,
    /// Listing status. Always true; no operation clears it.
    pub status: bool,
    /// Kind of listing.
    pub property_type: PropertyType,
    /// Guest capacity, 1..=20.
    pub capacity: u8,
    /// Amenities, at most 200 characters.
    pub amenities: String,
}

/// Most recent owner update of a property. Overwritten on each update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyUpdate {
    /// Location set by the update.
    pub update_location: String,
    /// Description set by the update.
    pub update_description: String,
    /// Height the update executed at.
    pub update_timestamp: BlockHeight,
    /// Identity that performed the update.
    pub updater: Principal,
}

// =============================================================================
// REGISTRATION INPUT
// =============================================================================

/// Raw caller input for a registration.
///
/// Fields are kept in their unvalidated form (strings, byte vector, wide
/// integers) so every rejection surfaces with its own error code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterPropertyRequest {
    /// Requested location.
    pub location: String,
    /// Requested description.
    pub description: String,
    /// Legal-document hash bytes; must be 32 long.
    pub legal_hash: Vec<u8>,
    /// Token supply.
    pub total_tokens: u64,
    /// Appraised value.
    pub value: u64,
    /// Currency ticker.
    pub currency: String,
    /// Property type name.
    pub property_type: String,
    /// Guest capacity.
    pub capacity: u32,
    /// Amenities text.
    pub amenities: String,
}

// =============================================================================
// EFFECTS
// =============================================================================

/// Instruction to move the registration fee to the authority.
///
/// The engine only describes the transfer; executing it is the host's job.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTransfer {
    /// Fee in effect when the registration was validated.
    pub amount: u64,
    /// Registering caller.
    pub from: Principal,
    /// Configured authority.
    pub to: Principal,
}

/// Outcome of a committed registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    /// Id assigned to the new property.
    pub id: PropertyId,
    /// Fee transfer the host must execute.
    pub fee_transfer: FeeTransfer,
}
