//! Mapping Registry - Process-wide storage of frozen entity maps

use std::any::TypeId;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::error::{MappingError, MappingResult};
use crate::mapping::{EntityMap, EntityMapping};

/// Process-wide map from entity type to its frozen [`EntityMap`].
///
/// Lifecycle is two-phase: single-threaded registration during application
/// startup, then read-only lookups for the process lifetime. Reads are safe
/// to run concurrently once registration is done; registering after the
/// first resolution has happened is a usage error this type does not police.
/// [`initialize`](Self::initialize) packages the populate-then-freeze
/// hand-off in one step for callers that want the discipline made explicit.
///
/// A second registration for an already-registered entity type is rejected
/// with [`MappingError::DuplicateRegistration`] and the first map stays in
/// place.
#[derive(Debug, Default)]
pub struct MappingRegistry {
    maps: DashMap<TypeId, Arc<EntityMap>>,
}

impl MappingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            maps: DashMap::new(),
        }
    }

    /// Build a registry in a single declaration pass:
    ///
    /// ```
    /// use entmap::{EntityMapBuilder, MappingRegistry};
    ///
    /// struct Customer;
    ///
    /// # fn main() -> entmap::MappingResult<()> {
    /// let registry = MappingRegistry::initialize(|config| {
    ///     let mut map = EntityMapBuilder::<Customer>::new();
    ///     map.map("id")?.to_column("CustomerId").key();
    ///     config.add_map(map.build());
    ///     Ok(())
    /// })?;
    /// assert!(registry.try_get::<Customer>().is_some());
    /// # Ok(())
    /// # }
    /// ```
    pub fn initialize(
        setup: impl FnOnce(&mut MappingConfiguration) -> MappingResult<()>,
    ) -> MappingResult<Self> {
        let mut config = MappingConfiguration::default();
        setup(&mut config)?;

        let registry = Self::new();
        for map in config.maps {
            registry.register(map)?;
        }
        debug!(entities = registry.len(), "mapping registry initialized");
        Ok(registry)
    }

    /// Store `map` under its entity type.
    pub fn register(&self, map: EntityMap) -> MappingResult<()> {
        let entity = map.entity();
        match self.maps.entry(entity.id()) {
            Entry::Occupied(_) => Err(MappingError::DuplicateRegistration {
                entity: entity.name(),
            }),
            Entry::Vacant(slot) => {
                debug!(
                    entity = %entity,
                    properties = map.property_maps().len(),
                    relationships = map.relationship_maps().len(),
                    "registering entity map"
                );
                slot.insert(Arc::new(map));
                Ok(())
            }
        }
    }

    /// Fetch the map registered for entity type `T`, if any.
    pub fn try_get<T: 'static>(&self) -> Option<Arc<EntityMap>> {
        self.try_get_by_id(TypeId::of::<T>())
    }

    /// Erased lookup for engines that carry a `TypeId` rather than a static
    /// type.
    pub fn try_get_by_id(&self, id: TypeId) -> Option<Arc<EntityMap>> {
        self.maps.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Whether a map is registered for entity type `T`.
    pub fn contains<T: 'static>(&self) -> bool {
        self.maps.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered entity types.
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

/// Collects entity maps during [`MappingRegistry::initialize`].
#[derive(Debug, Default)]
pub struct MappingConfiguration {
    maps: Vec<EntityMap>,
}

impl MappingConfiguration {
    /// Add an already-built map.
    pub fn add_map(&mut self, map: EntityMap) -> &mut Self {
        self.maps.push(map);
        self
    }

    /// Build and add the map declared by an [`EntityMapping`]
    /// implementation.
    pub fn add<M: EntityMapping>(&mut self) -> MappingResult<&mut Self> {
        let map = M::entity_map()?;
        self.maps.push(map);
        Ok(self)
    }
}
