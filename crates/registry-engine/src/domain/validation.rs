//! # Field Validation
//!
//! Pure, order-preserving checks on caller input. Each check maps to exactly
//! one [`RegistryError`] so a rejected request always names its first fault.

use crate::domain::entities::RegisterPropertyRequest;
use crate::domain::value_objects::{Currency, LegalHash, PropertyType};
use crate::errors::RegistryError;

/// Field limits and registry defaults.
pub mod limits {
    /// Maximum location length in characters.
    pub const MAX_LOCATION_LEN: usize = 100;

    /// Maximum description length in characters.
    pub const MAX_DESCRIPTION_LEN: usize = 500;

    /// Maximum amenities length in characters.
    pub const MAX_AMENITIES_LEN: usize = 200;

    /// Smallest accepted capacity.
    pub const MIN_CAPACITY: u32 = 1;

    /// Largest accepted capacity.
    pub const MAX_CAPACITY: u32 = 20;

    /// Default capacity ceiling of the registry.
    pub const DEFAULT_MAX_PROPERTIES: u64 = 1000;

    /// Default registration fee.
    pub const DEFAULT_REGISTRATION_FEE: u64 = 1000;
}

/// A request whose fields passed every local check.
///
/// Mirrors [`RegisterPropertyRequest`] with typed fields.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedListing {
    pub location: String,
    pub description: String,
    pub legal_hash: LegalHash,
    pub total_tokens: u64,
    pub value: u64,
    pub currency: Currency,
    pub property_type: PropertyType,
    pub capacity: u8,
    pub amenities: String,
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Non-empty and at most 100 characters.
pub fn validate_location(location: &str) -> Result<(), RegistryError> {
    if location.is_empty() || char_len(location) > limits::MAX_LOCATION_LEN {
        return Err(RegistryError::InvalidLocation);
    }
    Ok(())
}

/// Non-empty and at most 500 characters.
pub fn validate_description(description: &str) -> Result<(), RegistryError> {
    if description.is_empty() || char_len(description) > limits::MAX_DESCRIPTION_LEN {
        return Err(RegistryError::InvalidDescription);
    }
    Ok(())
}

/// Exactly 32 bytes.
pub fn validate_legal_hash(bytes: &[u8]) -> Result<LegalHash, RegistryError> {
    LegalHash::from_slice(bytes).ok_or(RegistryError::InvalidLegalHash(bytes.len()))
}

/// Capacity in `1..=20`.
pub fn validate_capacity(capacity: u32) -> Result<u8, RegistryError> {
    if !(limits::MIN_CAPACITY..=limits::MAX_CAPACITY).contains(&capacity) {
        return Err(RegistryError::InvalidCapacity(capacity));
    }
    u8::try_from(capacity).map_err(|_| RegistryError::InvalidCapacity(capacity))
}

/// At most 200 characters; empty is allowed.
pub fn validate_amenities(amenities: &str) -> Result<(), RegistryError> {
    if char_len(amenities) > limits::MAX_AMENITIES_LEN {
        return Err(RegistryError::InvalidAmenities);
    }
    Ok(())
}

/// Runs the field checks of a registration in their fixed order:
/// location, description, legal hash, total tokens, value, currency,
/// property type, capacity, amenities.
///
/// Registry-wide checks (capacity ceiling, location uniqueness, authority)
/// are not part of this function.
pub fn validate_listing(request: &RegisterPropertyRequest) -> Result<ValidatedListing, RegistryError> {
    validate_location(&request.location)?;
    validate_description(&request.description)?;
    let legal_hash = validate_legal_hash(&request.legal_hash)?;
    if request.total_tokens == 0 {
        return Err(RegistryError::InvalidTotalTokens);
    }
    if request.value == 0 {
        return Err(RegistryError::InvalidValue);
    }
    let currency: Currency = request
        .currency
        .parse()
        .map_err(|()| RegistryError::InvalidCurrency(request.currency.clone()))?;
    let property_type: PropertyType = request
        .property_type
        .parse()
        .map_err(|()| RegistryError::InvalidPropertyType(request.property_type.clone()))?;
    let capacity = validate_capacity(request.capacity)?;
    validate_amenities(&request.amenities)?;

    Ok(ValidatedListing {
        location: request.location.clone(),
        description: request.description.clone(),
        legal_hash,
        total_tokens: request.total_tokens,
        value: request.value,
        currency,
        property_type,
        capacity,
        amenities: request.amenities.clone(),
    })
}
