//! Entity Map - Per-entity mapping declarations and the fluent builder

use std::marker::PhantomData;

use tracing::debug;

use super::entity::EntityType;
use super::property::PropertyMap;
use super::relationship::{NavigationTarget, RelationshipKind, RelationshipMap, Sequence};
use crate::error::{MappingError, MappingResult};

/// A frozen set of property and relationship mappings for one entity type.
///
/// Built through [`EntityMapBuilder`] in a single declaration pass during
/// startup and never mutated afterwards; the registry hands out shared
/// references for concurrent reads.
#[derive(Debug, Clone)]
pub struct EntityMap {
    entity: EntityType,
    table: Option<String>,
    properties: Vec<PropertyMap>,
    relationships: Vec<RelationshipMap>,
}

impl EntityMap {
    /// The entity type these mappings were declared for.
    pub fn entity(&self) -> EntityType {
        self.entity
    }

    /// The declared table-name override, if any.
    pub fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// The property maps in declaration order.
    pub fn property_maps(&self) -> &[PropertyMap] {
        &self.properties
    }

    /// The relationship maps in declaration order.
    pub fn relationship_maps(&self) -> &[RelationshipMap] {
        &self.relationships
    }

    /// Look up the property map for an exact field name.
    pub fn property_map(&self, field: &str) -> Option<&PropertyMap> {
        self.properties.iter().find(|p| p.property() == field)
    }

    /// Look up the relationship map for an exact field name.
    pub fn relationship_map(&self, field: &str) -> Option<&RelationshipMap> {
        self.relationships.iter().find(|r| r.property() == field)
    }

    /// Property maps flagged as part of the primary key, in declaration
    /// order.
    pub fn key_properties(&self) -> impl Iterator<Item = &PropertyMap> {
        self.properties.iter().filter(|p| p.is_key())
    }
}

/// Fluent builder for an [`EntityMap`] over entity type `T`.
///
/// Construction is single-threaded startup work; the builder is consumed by
/// [`build`](Self::build) before the map is published to the registry. Each
/// field may be declared once, whether as a property or a relationship; a
/// second declaration fails and leaves the builder untouched.
#[derive(Debug)]
pub struct EntityMapBuilder<T> {
    entity: EntityType,
    table: Option<String>,
    properties: Vec<PropertyMap>,
    relationships: Vec<RelationshipMap>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: 'static> Default for EntityMapBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> EntityMapBuilder<T> {
    pub fn new() -> Self {
        Self {
            entity: EntityType::of::<T>(),
            table: None,
            properties: Vec::new(),
            relationships: Vec::new(),
            _entity: PhantomData,
        }
    }

    /// Override the table name for this entity.
    pub fn to_table(&mut self, table: &str) -> &mut Self {
        self.table = Some(table.to_string());
        self
    }

    /// Start mapping a field. Returns the new [`PropertyMap`] for fluent
    /// configuration, or [`MappingError::DuplicateMapping`] if the field is
    /// already declared on this entity.
    pub fn map(&mut self, field: &str) -> MappingResult<&mut PropertyMap> {
        self.check_duplicate(field)?;
        debug!(entity = %self.entity, field, "mapping property");
        let index = self.properties.len();
        self.properties.push(PropertyMap::new(field));
        Ok(&mut self.properties[index])
    }

    /// Declare a one-to-one association with related entity `R`.
    pub fn has_one<R: 'static>(&mut self, field: &str) -> MappingResult<&mut RelationshipMap> {
        self.relationship(field, RelationshipKind::HasOne, NavigationTarget::entity::<R>())
    }

    /// Declare a one-to-many association through a sequence-typed navigation
    /// property `S`; the related entity is `S::Element`.
    pub fn with_many<S: Sequence>(&mut self, field: &str) -> MappingResult<&mut RelationshipMap> {
        self.relationship(
            field,
            RelationshipKind::WithMany,
            NavigationTarget::sequence::<S>(),
        )
    }

    /// Declaration path for callers that describe the navigation property
    /// shape themselves; [`has_one`](Self::has_one) and
    /// [`with_many`](Self::with_many) funnel into this. A `WithMany` kind
    /// over a non-sequence target fails with
    /// [`MappingError::MalformedRelationship`].
    pub fn relationship(
        &mut self,
        field: &str,
        kind: RelationshipKind,
        target: NavigationTarget,
    ) -> MappingResult<&mut RelationshipMap> {
        self.check_duplicate(field)?;
        let map = RelationshipMap::new(self.entity, field, kind, target)?;
        debug!(entity = %self.entity, field, ?kind, "mapping relationship");
        let index = self.relationships.len();
        self.relationships.push(map);
        Ok(&mut self.relationships[index])
    }

    /// Freeze the declarations into an immutable [`EntityMap`].
    pub fn build(self) -> EntityMap {
        EntityMap {
            entity: self.entity,
            table: self.table,
            properties: self.properties,
            relationships: self.relationships,
        }
    }

    fn check_duplicate(&self, field: &str) -> MappingResult<()> {
        let declared = self.properties.iter().any(|p| p.property() == field)
            || self.relationships.iter().any(|r| r.property() == field);
        if declared {
            return Err(MappingError::DuplicateMapping {
                entity: self.entity.name(),
                property: field.to_string(),
            });
        }
        Ok(())
    }
}

/// Declarative mapping for an entity type: the declaration lives with the
/// entity and is picked up by
/// [`MappingConfiguration::add`](crate::MappingConfiguration::add) during
/// registry initialization.
pub trait EntityMapping: Sized + 'static {
    /// Declare the property and relationship mappings for `Self`.
    fn configure(map: &mut EntityMapBuilder<Self>) -> MappingResult<()>;

    /// Run [`configure`](Self::configure) and freeze the result.
    fn entity_map() -> MappingResult<EntityMap> {
        let mut builder = EntityMapBuilder::new();
        Self::configure(&mut builder)?;
        Ok(builder.build())
    }
}
