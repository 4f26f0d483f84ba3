//! # Value Objects
//!
//! Immutable domain primitives for property listings.
//! These types represent concepts that are defined by their value, not identity.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Identifier assigned to a property at registration.
pub type PropertyId = u64;

// =============================================================================
// LEGAL HASH (32 bytes)
// =============================================================================

/// Content hash of the off-system legal document backing a property.
///
/// A stored property always carries exactly 32 bytes; the length check on raw
/// caller input happens in [`LegalHash::from_slice`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LegalHash(pub [u8; 32]);

impl LegalHash {
    /// Required length in bytes.
    pub const LEN: usize = 32;

    /// Creates a hash from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates a hash from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 32]>::try_from(slice).ok().map(Self)
    }

    /// SHA-256 digest of a legal document.
    #[must_use]
    pub fn of_document(document: &[u8]) -> Self {
        Self(Sha256::digest(document).into())
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex encoding without prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for LegalHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Display for LegalHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "0x{}...{}", &hex[..8], &hex[60..])
    }
}

impl From<[u8; 32]> for LegalHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// CURRENCY
// =============================================================================

/// Currency a property value is denominated in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Stacks token.
    #[serde(rename = "STX")]
    Stx,
    /// US dollar.
    #[serde(rename = "USD")]
    Usd,
    /// Bitcoin.
    #[serde(rename = "BTC")]
    Btc,
}

impl Currency {
    /// Canonical ticker.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stx => "STX",
            Self::Usd => "USD",
            Self::Btc => "BTC",
        }
    }
}

impl FromStr for Currency {
    type Err = ();

    /// Tickers are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STX" => Ok(Self::Stx),
            "USD" => Ok(Self::Usd),
            "BTC" => Ok(Self::Btc),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// PROPERTY TYPE
// =============================================================================

/// Kind of listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// Beachfront.
    Beach,
    /// Mountain retreat.
    Mountain,
    /// City property.
    Urban,
}

impl PropertyType {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beach => "beach",
            Self::Mountain => "mountain",
            Self::Urban => "urban",
        }
    }
}

impl FromStr for PropertyType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beach" => Ok(Self::Beach),
            "mountain" => Ok(Self::Mountain),
            "urban" => Ok(Self::Urban),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// TESTS
// =============================================================================
