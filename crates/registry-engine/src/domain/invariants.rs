//! # Domain Invariants
//!
//! Properties of [`RegistryState`] that must hold after every operation.
//! Operations preserve them by construction; these checks guard state that
//! arrives from outside, such as a reloaded snapshot.

use crate::domain::state::RegistryState;
use crate::domain::value_objects::PropertyId;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// The location index is exactly the inverse of the stored locations.
#[must_use]
pub fn check_location_index_invariant(state: &RegistryState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let book = state.book();

    for (location, id) in book.locations() {
        let matches = book
            .get(*id)
            .is_some_and(|property| &property.location == location);
        if !matches {
            violations.push(InvariantViolation::DanglingLocation {
                location: location.clone(),
                id: *id,
            });
        }
    }
    for (id, property) in book.properties() {
        if book.id_at(&property.location) != Some(*id) {
            violations.push(InvariantViolation::UnindexedProperty { id: *id });
        }
    }
    violations
}

/// `next_property_id` counts every stored property and exceeds every id.
#[must_use]
pub fn check_id_counter_invariant(state: &RegistryState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let stored = state.book().len() as u64;

    if stored != state.property_count() {
        violations.push(InvariantViolation::IdCounterMismatch {
            next_id: state.property_count(),
            stored,
        });
    }
    for id in state.book().properties().keys() {
        if *id >= state.property_count() {
            violations.push(InvariantViolation::IdOutOfRange {
                id: *id,
                next_id: state.property_count(),
            });
        }
    }
    violations
}

/// No more properties than the configured ceiling.
#[must_use]
pub fn check_capacity_invariant(state: &RegistryState) -> Vec<InvariantViolation> {
    if state.property_count() > state.max_properties() {
        vec![InvariantViolation::CapacityExceeded {
            count: state.property_count(),
            max: state.max_properties(),
        }]
    } else {
        Vec::new()
    }
}

/// Every update record belongs to a stored property.
#[must_use]
pub fn check_update_references_invariant(state: &RegistryState) -> Vec<InvariantViolation> {
    state
        .property_updates
        .keys()
        .filter(|id| !state.verify_property(**id))
        .map(|id| InvariantViolation::OrphanUpdate { id: *id })
        .collect()
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(state: &RegistryState) -> InvariantCheckResult {
    let mut violations = check_location_index_invariant(state);
    violations.extend(check_id_counter_invariant(state));
    violations.extend(check_capacity_invariant(state));
    violations.extend(check_update_references_invariant(state));

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Index entry points at a missing property or one elsewhere.
    DanglingLocation { location: String, id: PropertyId },
    /// Stored property not reachable through the index.
    UnindexedProperty { id: PropertyId },
    /// Counter differs from the number of stored properties.
    IdCounterMismatch { next_id: u64, stored: u64 },
    /// Stored id not below the counter.
    IdOutOfRange { id: PropertyId, next_id: u64 },
    /// More properties than the ceiling allows.
    CapacityExceeded { count: u64, max: u64 },
    /// Update record without a property.
    OrphanUpdate { id: PropertyId },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DanglingLocation { location, id } => {
                write!(f, "location {location:?} indexed to property {id} which is not there")
            }
            Self::UnindexedProperty { id } => {
                write!(f, "property {id} missing from location index")
            }
            Self::IdCounterMismatch { next_id, stored } => {
                write!(f, "next id {next_id} but {stored} properties stored")
            }
            Self::IdOutOfRange { id, next_id } => {
                write!(f, "property id {id} not below next id {next_id}")
            }
            Self::CapacityExceeded { count, max } => {
                write!(f, "{count} properties exceed capacity {max}")
            }
            Self::OrphanUpdate { id } => {
                write!(f, "orphan update record for property {id}")
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
