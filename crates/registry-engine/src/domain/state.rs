//! # Registry State Machine
//!
//! The single owned state object and every operation that reads or mutates
//! it. Operations validate completely before the first write, so a rejected
//! call never leaves a partial change behind.

use crate::domain::entities::{
    FeeTransfer, Property, PropertyUpdate, RegisterPropertyRequest, Registration,
};
use crate::domain::index::PropertyBook;
use crate::domain::validation::{self, limits, ValidatedListing};
use crate::domain::value_objects::PropertyId;
use crate::errors::RegistryError;
use shared_types::{CallContext, Principal};
use std::collections::BTreeMap;

/// Complete registry state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryState {
    pub(crate) next_property_id: PropertyId,
    pub(crate) max_properties: u64,
    pub(crate) registration_fee: u64,
    pub(crate) authority_contract: Option<Principal>,
    pub(crate) book: PropertyBook,
    pub(crate) property_updates: BTreeMap<PropertyId, PropertyUpdate>,
}

impl Default for RegistryState {
    fn default() -> Self {
        Self::new(
            limits::DEFAULT_MAX_PROPERTIES,
            limits::DEFAULT_REGISTRATION_FEE,
        )
    }
}

/// A registration that passed every check but is not yet applied.
///
/// Produced by [`RegistryState::prepare_registration`] so the host can settle
/// the fee before calling [`RegistryState::commit_registration`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingRegistration {
    id: PropertyId,
    property: Property,
    fee_transfer: FeeTransfer,
}

impl PendingRegistration {
    /// Id the property will receive.
    #[must_use]
    pub fn id(&self) -> PropertyId {
        self.id
    }

    /// Record that will be stored.
    #[must_use]
    pub fn property(&self) -> &Property {
        &self.property
    }

    /// Fee transfer owed for this registration.
    #[must_use]
    pub fn fee_transfer(&self) -> &FeeTransfer {
        &self.fee_transfer
    }
}

impl RegistryState {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(max_properties: u64, registration_fee: u64) -> Self {
        Self {
            next_property_id: 0,
            max_properties,
            registration_fee,
            authority_contract: None,
            book: PropertyBook::new(),
            property_updates: BTreeMap::new(),
        }
    }

    // =========================================================================
    // AUTHORITY CONFIGURATION
    // =========================================================================

    /// Sets the fee-receiving authority. Succeeds once; later calls fail
    /// with `AlreadyConfigured` and leave the authority unchanged.
    pub fn set_authority_contract(&mut self, authority: Principal) -> Result<(), RegistryError> {
        if self.authority_contract.is_some() {
            return Err(RegistryError::AlreadyConfigured);
        }
        self.authority_contract = Some(authority);
        Ok(())
    }

    /// Replaces the registration fee.
    ///
    /// Requires a configured authority, and the caller must be that
    /// authority. Any amount is accepted.
    pub fn set_registration_fee(
        &mut self,
        caller: &Principal,
        amount: u64,
    ) -> Result<(), RegistryError> {
        match &self.authority_contract {
            Some(authority) if authority == caller => {
                self.registration_fee = amount;
                Ok(())
            }
            _ => Err(RegistryError::NotAuthorized),
        }
    }

    // =========================================================================
    // REGISTRATION
    // =========================================================================

    /// Runs the full registration pipeline without mutating state.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// capacity ceiling, field checks, location uniqueness, authority.
    pub fn prepare_registration(
        &self,
        ctx: &CallContext,
        request: &RegisterPropertyRequest,
    ) -> Result<PendingRegistration, RegistryError> {
        if self.next_property_id >= self.max_properties {
            return Err(RegistryError::CapacityExceeded {
                max: self.max_properties,
            });
        }
        let listing = validation::validate_listing(request)?;
        if self.book.id_at(&listing.location).is_some() {
            return Err(RegistryError::PropertyAlreadyExists(listing.location));
        }
        let authority = self
            .authority_contract
            .clone()
            .ok_or(RegistryError::AuthorityNotVerified)?;

        Ok(PendingRegistration {
            id: self.next_property_id,
            property: new_property(ctx, listing),
            fee_transfer: FeeTransfer {
                amount: self.registration_fee,
                from: ctx.caller.clone(),
                to: authority,
            },
        })
    }

    /// Applies a prepared registration.
    ///
    /// Fails with `StaleRegistration` if another registration committed
    /// since `pending` was prepared, and with `PropertyAlreadyExists` if its
    /// location was taken in the meantime.
    pub fn commit_registration(
        &mut self,
        pending: PendingRegistration,
    ) -> Result<Registration, RegistryError> {
        if pending.id != self.next_property_id {
            return Err(RegistryError::StaleRegistration {
                prepared: pending.id,
                next: self.next_property_id,
            });
        }
        self.book.insert(pending.id, pending.property)?;
        self.next_property_id += 1;
        Ok(Registration {
            id: pending.id,
            fee_transfer: pending.fee_transfer,
        })
    }

    /// Validates and applies a registration in one step.
    ///
    /// The returned [`FeeTransfer`] has not been executed.
    pub fn register_property(
        &mut self,
        ctx: &CallContext,
        request: &RegisterPropertyRequest,
    ) -> Result<Registration, RegistryError> {
        let pending = self.prepare_registration(ctx, request)?;
        self.commit_registration(pending)
    }

    // =========================================================================
    // UPDATE
    // =========================================================================

    /// Owner-only change of location and description.
    ///
    /// Replaces the property's single update record with one stamped by the
    /// caller and the current height.
    pub fn update_property(
        &mut self,
        ctx: &CallContext,
        id: PropertyId,
        new_location: String,
        new_description: String,
    ) -> Result<(), RegistryError> {
        let property = self.book.get(id).ok_or(RegistryError::PropertyNotFound(id))?;
        if property.owner != ctx.caller {
            return Err(RegistryError::NotAuthorized);
        }
        validation::validate_location(&new_location)?;
        validation::validate_description(&new_description)?;

        let update = PropertyUpdate {
            update_location: new_location.clone(),
            update_description: new_description.clone(),
            update_timestamp: ctx.height,
            updater: ctx.caller.clone(),
        };
        self.book
            .relocate(id, new_location, new_description, ctx.height)?;
        self.property_updates.insert(id, update);
        Ok(())
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Property with the given id.
    #[must_use]
    pub fn get_property(&self, id: PropertyId) -> Option<&Property> {
        self.book.get(id)
    }

    /// Most recent update of the given property.
    #[must_use]
    pub fn get_property_update(&self, id: PropertyId) -> Option<&PropertyUpdate> {
        self.property_updates.get(&id)
    }

    /// Number of properties ever registered.
    #[must_use]
    pub fn property_count(&self) -> u64 {
        self.next_property_id
    }

    /// True if the id names a registered property.
    #[must_use]
    pub fn verify_property(&self, id: PropertyId) -> bool {
        self.book.contains(id)
    }

    /// Id of the property at `location`.
    #[must_use]
    pub fn property_id_by_location(&self, location: &str) -> Option<PropertyId> {
        self.book.id_at(location)
    }

    /// Current registration fee.
    #[must_use]
    pub fn registration_fee(&self) -> u64 {
        self.registration_fee
    }

    /// Configured authority, if any.
    #[must_use]
    pub fn authority_contract(&self) -> Option<&Principal> {
        self.authority_contract.as_ref()
    }

    /// Capacity ceiling.
    #[must_use]
    pub fn max_properties(&self) -> u64 {
        self.max_properties
    }

    /// Properties and location index.
    #[must_use]
    pub fn book(&self) -> &PropertyBook {
        &self.book
    }
}

fn new_property(ctx: &CallContext, listing: ValidatedListing) -> Property {
    Property {
        owner: ctx.caller.clone(),
        location: listing.location,
        description: listing.description,
        legal_hash: listing.legal_hash,
        total_tokens: listing.total_tokens,
        timestamp: ctx.height,
        value: listing.value,
        currency: listing.currency,
        status: true,
        property_type: listing.property_type,
        capacity: listing.capacity,
        amenities: listing.amenities,
    }
}

// =============================================================================
// TESTS
// =============================================================================
