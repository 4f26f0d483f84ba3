//! # Driving Port (API - Inbound)
//!
//! The operation surface hosts call into. Caller identity and height arrive
//! as a [`CallContext`] on every mutating call.

use crate::domain::entities::{Property, PropertyUpdate, RegisterPropertyRequest};
use crate::domain::value_objects::PropertyId;
use crate::errors::ServiceError;
use shared_types::{CallContext, Principal};

/// Primary API for registry operations.
///
/// Implementations must execute calls one at a time: each call either
/// applies all of its changes or none.
pub trait PropertyRegistryApi: Send + Sync {
    // === Authority Configuration ===

    /// Sets the authority. Fails with `AlreadyConfigured` once set.
    fn set_authority_contract(
        &self,
        ctx: &CallContext,
        authority: Principal,
    ) -> Result<(), ServiceError>;

    /// Replaces the registration fee. Caller must be the authority.
    fn set_registration_fee(&self, ctx: &CallContext, amount: u64) -> Result<(), ServiceError>;

    // === Registration & Update ===

    /// Registers a property and returns its id.
    fn register_property(
        &self,
        ctx: &CallContext,
        request: RegisterPropertyRequest,
    ) -> Result<PropertyId, ServiceError>;

    /// Owner-only change of location and description.
    fn update_property(
        &self,
        ctx: &CallContext,
        id: PropertyId,
        new_location: String,
        new_description: String,
    ) -> Result<(), ServiceError>;

    // === Queries ===

    /// Property with the given id.
    fn get_property(&self, id: PropertyId) -> Option<Property>;

    /// Most recent update of the given property.
    fn get_property_update(&self, id: PropertyId) -> Option<PropertyUpdate>;

    /// Number of properties ever registered.
    fn get_property_count(&self) -> u64;

    /// True if the id names a registered property.
    fn verify_property(&self, id: PropertyId) -> bool;

    /// Current registration fee.
    fn get_registration_fee(&self) -> u64;

    /// Configured authority, if any.
    fn get_authority_contract(&self) -> Option<Principal>;

    /// Id of the property at `location`.
    fn get_property_id_by_location(&self, location: &str) -> Option<PropertyId>;
}
