//! # Domain Layer (Inner Hexagon)
//!
//! Pure business logic of the property registry.
//! NO I/O, NO locking, NO payment or storage calls.
//!
//! - [`state::RegistryState`] owns every map and counter and exposes the
//!   state-mutating operations.
//! - [`index::PropertyBook`] keeps properties and their location index in
//!   lockstep.
//! - [`validation`] holds the ordered field checks.
//! - [`invariants`] verifies state that did not come from the operations.

pub mod entities;
pub mod index;
pub mod invariants;
pub mod snapshot;
pub mod state;
pub mod validation;
pub mod value_objects;

pub use entities::*;
pub use index::*;
pub use invariants::*;
pub use snapshot::*;
pub use state::*;
pub use validation::{limits, ValidatedListing};
pub use value_objects::*;
