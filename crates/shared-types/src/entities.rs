//! # Core Entities
//!
//! Identity and ordering primitives supplied by the host on every call.

use crate::errors::InvalidPrincipal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// External monotonic counter (block or sequence number).
pub type BlockHeight = u64;

/// An account identity, e.g. `ST1TEST`. Never empty.
///
/// Principals are opaque to the registry: two principals are the same
/// identity iff their strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal(String);

impl Principal {
    /// Creates a principal. Fails if `id` is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidPrincipal> {
        let id = id.into();
        if id.is_empty() {
            return Err(InvalidPrincipal);
        }
        Ok(Self(id))
    }

    /// Returns the principal as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Principal {
    type Error = InvalidPrincipal;

    fn try_from(id: &str) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl TryFrom<String> for Principal {
    type Error = InvalidPrincipal;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<Principal> for String {
    fn from(principal: Principal) -> Self {
        principal.0
    }
}

/// Ambient context of a single registry call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Identity invoking the operation.
    pub caller: Principal,
    /// Height at which the operation executes.
    pub height: BlockHeight,
}

impl CallContext {
    /// Creates a context for `caller` at `height`.
    #[must_use]
    pub fn new(caller: Principal, height: BlockHeight) -> Self {
        Self { caller, height }
    }
}
