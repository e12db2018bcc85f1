//! Mapping Module - Fluent declaration of entity-to-column maps
//!
//! - `entity`: reflection-free entity type identity
//! - `property`: single field-to-column bindings
//! - `relationship`: entity-to-entity associations and join predicates
//! - `entity_map`: the per-entity map and its fluent builder

pub mod entity;
pub mod entity_map;
pub mod property;
pub mod relationship;

pub use entity::EntityType;
pub use entity_map::{EntityMap, EntityMapBuilder, EntityMapping};
pub use property::PropertyMap;
pub use relationship::{
    JoinClause, JoinPredicate, NavigationTarget, RelationshipKind, RelationshipMap, Sequence,
};
