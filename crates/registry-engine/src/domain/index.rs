//! # Property Book
//!
//! Properties and their location index behind one type, so the two maps can
//! only change together.

use crate::domain::entities::Property;
use crate::domain::value_objects::PropertyId;
use crate::errors::RegistryError;
use shared_types::BlockHeight;
use std::collections::BTreeMap;

/// Properties keyed by id plus the inverse location index.
///
/// Invariant: `by_location` maps every stored location to the id of the
/// property holding it, and nothing else.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyBook {
    properties: BTreeMap<PropertyId, Property>,
    by_location: BTreeMap<String, PropertyId>,
}

impl PropertyBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reassembles a book from persisted maps without checking them.
    ///
    /// Callers must run the invariant checks before trusting the result.
    pub(crate) fn from_parts(
        properties: BTreeMap<PropertyId, Property>,
        by_location: BTreeMap<String, PropertyId>,
    ) -> Self {
        Self {
            properties,
            by_location,
        }
    }

    /// Number of stored properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// True if no property is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Property with the given id.
    #[must_use]
    pub fn get(&self, id: PropertyId) -> Option<&Property> {
        self.properties.get(&id)
    }

    /// True if a property with the given id exists.
    #[must_use]
    pub fn contains(&self, id: PropertyId) -> bool {
        self.properties.contains_key(&id)
    }

    /// Id of the property at `location`.
    #[must_use]
    pub fn id_at(&self, location: &str) -> Option<PropertyId> {
        self.by_location.get(location).copied()
    }

    /// All properties by id.
    #[must_use]
    pub fn properties(&self) -> &BTreeMap<PropertyId, Property> {
        &self.properties
    }

    /// The location index.
    #[must_use]
    pub fn locations(&self) -> &BTreeMap<String, PropertyId> {
        &self.by_location
    }

    /// Stores a new property and indexes its location.
    ///
    /// The id must be fresh; the location must be unoccupied.
    pub fn insert(&mut self, id: PropertyId, property: Property) -> Result<(), RegistryError> {
        if self.by_location.contains_key(&property.location) {
            return Err(RegistryError::PropertyAlreadyExists(property.location));
        }
        debug_assert!(!self.properties.contains_key(&id), "property id {id} reused");
        self.by_location.insert(property.location.clone(), id);
        self.properties.insert(id, property);
        Ok(())
    }

    /// Moves a property to `new_location`, replacing its description and
    /// stamping `height`.
    ///
    /// Moving a property onto its own current location is allowed.
    pub fn relocate(
        &mut self,
        id: PropertyId,
        new_location: String,
        new_description: String,
        height: BlockHeight,
    ) -> Result<&Property, RegistryError> {
        if let Some(holder) = self.id_at(&new_location) {
            if holder != id {
                return Err(RegistryError::PropertyAlreadyExists(new_location));
            }
        }
        let property = self
            .properties
            .get_mut(&id)
            .ok_or(RegistryError::PropertyNotFound(id))?;

        self.by_location.remove(&property.location);
        self.by_location.insert(new_location.clone(), id);

        property.location = new_location;
        property.description = new_description;
        property.timestamp = height;
        Ok(&*property)
    }
}
