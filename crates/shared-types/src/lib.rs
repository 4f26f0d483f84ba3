//! # Shared Types Crate
//!
//! Primitives shared between the registry engine and the hosts that drive it.
//!
//! ## Design Principles
//!
//! - **Ambient Call Context**: every operation receives the caller identity and
//!   the current height through a [`CallContext`]; neither is global state.
//! - **Collaborator Errors Live Here**: storage and payment adapters are
//!   implemented outside the engine, so their error types are defined once here.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
