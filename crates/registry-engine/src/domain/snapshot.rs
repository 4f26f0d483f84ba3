//! # Persisted State Layout
//!
//! The flat form of [`RegistryState`] handed to the storage collaborator:
//! every map and scalar keyed exactly as the live state keys them.

use crate::domain::entities::{Property, PropertyUpdate};
use crate::domain::index::PropertyBook;
use crate::domain::invariants::{check_all_invariants, InvariantCheckResult};
use crate::domain::state::RegistryState;
use crate::domain::value_objects::PropertyId;
use crate::errors::SnapshotError;
use serde::{Deserialize, Serialize};
use shared_types::Principal;
use std::collections::BTreeMap;

/// Serializable registry state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Next unused property id.
    pub next_property_id: PropertyId,
    /// Capacity ceiling.
    pub max_properties: u64,
    /// Current registration fee.
    pub registration_fee: u64,
    /// Write-once authority.
    pub authority_contract: Option<Principal>,
    /// Properties by id.
    pub properties: BTreeMap<PropertyId, Property>,
    /// Latest update record by property id.
    pub property_updates: BTreeMap<PropertyId, PropertyUpdate>,
    /// Location index.
    pub properties_by_location: BTreeMap<String, PropertyId>,
}

impl RegistryState {
    /// Copies the state into its persisted layout.
    #[must_use]
    pub fn to_snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            next_property_id: self.next_property_id,
            max_properties: self.max_properties,
            registration_fee: self.registration_fee,
            authority_contract: self.authority_contract.clone(),
            properties: self.book.properties().clone(),
            property_updates: self.property_updates.clone(),
            properties_by_location: self.book.locations().clone(),
        }
    }

    /// Rebuilds state from a snapshot, rejecting one that breaks any
    /// registry invariant.
    pub fn from_snapshot(snapshot: RegistrySnapshot) -> Result<Self, SnapshotError> {
        let state = Self {
            next_property_id: snapshot.next_property_id,
            max_properties: snapshot.max_properties,
            registration_fee: snapshot.registration_fee,
            authority_contract: snapshot.authority_contract,
            book: PropertyBook::from_parts(snapshot.properties, snapshot.properties_by_location),
            property_updates: snapshot.property_updates,
        };
        match check_all_invariants(&state) {
            InvariantCheckResult::Valid => Ok(state),
            InvariantCheckResult::Invalid(violations) => Err(SnapshotError { violations }),
        }
    }
}
