//! Relationship Map - Entity-to-entity associations and join predicates

use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};

use serde::{Deserialize, Serialize};

use super::entity::EntityType;
use crate::error::{MappingError, MappingResult};

/// The kind of association a navigation property declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    /// One-to-one: the navigation property holds a single related entity.
    HasOne,
    /// One-to-many: the navigation property holds a sequence of related
    /// entities.
    WithMany,
}

impl RelationshipKind {
    /// Returns true if this kind expects a sequence-shaped navigation
    /// property.
    pub fn is_collection(self) -> bool {
        matches!(self, Self::WithMany)
    }
}

/// Owned collection types usable as `with_many` navigation properties.
///
/// `Element` is the related entity type a one-to-many declaration refers to.
/// Covering the std owned collections keeps the typed declaration path a
/// compile-time check; the shape is re-validated at runtime for callers
/// going through [`NavigationTarget`] directly.
pub trait Sequence: 'static {
    type Element: 'static;
}

impl<T: 'static> Sequence for Vec<T> {
    type Element = T;
}

impl<T: 'static> Sequence for VecDeque<T> {
    type Element = T;
}

impl<T: 'static> Sequence for LinkedList<T> {
    type Element = T;
}

impl<T: 'static> Sequence for Box<[T]> {
    type Element = T;
}

impl<T: 'static, S: 'static> Sequence for HashSet<T, S> {
    type Element = T;
}

impl<T: 'static> Sequence for BTreeSet<T> {
    type Element = T;
}

/// The shape of a navigation property's Rust type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
    /// A single related entity, e.g. `Address`.
    Entity(EntityType),
    /// A sequence of related entities, e.g. `Vec<OrderLine>`.
    Sequence {
        /// The collection type itself.
        container: EntityType,
        /// The element type the collection yields.
        element: EntityType,
    },
}

impl NavigationTarget {
    /// Target for a single-entity navigation property.
    pub fn entity<T: 'static>() -> Self {
        Self::Entity(EntityType::of::<T>())
    }

    /// Target for a sequence navigation property.
    pub fn sequence<S: Sequence>() -> Self {
        Self::Sequence {
            container: EntityType::of::<S>(),
            element: EntityType::of::<S::Element>(),
        }
    }
}

/// One parent-field = child-field equality clause of a join predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinClause {
    pub parent_field: String,
    pub child_field: String,
}

/// A data-only join predicate: the conjunction of field equality clauses a
/// query engine turns into a JOIN or filter. Stored here, never evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinPredicate {
    clauses: Vec<JoinClause>,
}

impl JoinPredicate {
    /// Append a parent-field = child-field equality clause.
    pub fn push(&mut self, parent_field: &str, child_field: &str) {
        self.clauses.push(JoinClause {
            parent_field: parent_field.to_string(),
            child_field: child_field.to_string(),
        });
    }

    /// The equality clauses in declaration order.
    pub fn clauses(&self) -> &[JoinClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// A single entity-to-entity association declared on an
/// [`EntityMap`](crate::EntityMap).
///
/// The referenced entity type follows the navigation property shape: the
/// property type itself for [`RelationshipKind::HasOne`], the sequence
/// element type for [`RelationshipKind::WithMany`].
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipMap {
    entity: EntityType,
    property: String,
    kind: RelationshipKind,
    target: NavigationTarget,
    referenced: EntityType,
    predicate: Option<JoinPredicate>,
}

impl RelationshipMap {
    pub(crate) fn new(
        entity: EntityType,
        property: &str,
        kind: RelationshipKind,
        target: NavigationTarget,
    ) -> MappingResult<Self> {
        let referenced = match (kind, target) {
            (RelationshipKind::HasOne, NavigationTarget::Entity(ty)) => ty,
            (RelationshipKind::HasOne, NavigationTarget::Sequence { container, .. }) => container,
            (RelationshipKind::WithMany, NavigationTarget::Sequence { element, .. }) => element,
            (RelationshipKind::WithMany, NavigationTarget::Entity(_)) => {
                return Err(MappingError::MalformedRelationship {
                    entity: entity.name(),
                    property: property.to_string(),
                });
            }
        };

        Ok(Self {
            entity,
            property: property.to_string(),
            kind,
            target,
            referenced,
            predicate: None,
        })
    }

    /// Append a parent-field = child-field equality clause to the join
    /// predicate, creating it on first use. Chain calls for composite keys.
    pub fn join_on(&mut self, parent_field: &str, child_field: &str) -> &mut Self {
        self.predicate
            .get_or_insert_with(JoinPredicate::default)
            .push(parent_field, child_field);
        self
    }

    /// The declaring entity type.
    pub fn entity(&self) -> EntityType {
        self.entity
    }

    /// The navigation property this association was declared for.
    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    /// The declared shape of the navigation property.
    pub fn target(&self) -> NavigationTarget {
        self.target
    }

    /// The related entity type generated SQL should join against.
    pub fn referenced_entity(&self) -> EntityType {
        self.referenced
    }

    /// The stored join predicate, if one was declared.
    pub fn predicate(&self) -> Option<&JoinPredicate> {
        self.predicate.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Customer;
    struct Address;
    struct OrderLine;

    fn customer() -> EntityType {
        EntityType::of::<Customer>()
    }

    #[test]
    fn has_one_references_property_type() {
        let map = RelationshipMap::new(
            customer(),
            "address",
            RelationshipKind::HasOne,
            NavigationTarget::entity::<Address>(),
        )
        .unwrap();

        assert_eq!(map.kind(), RelationshipKind::HasOne);
        assert_eq!(map.referenced_entity(), EntityType::of::<Address>());
        assert!(map.predicate().is_none());
    }

    #[test]
    fn with_many_references_element_type() {
        let map = RelationshipMap::new(
            customer(),
            "lines",
            RelationshipKind::WithMany,
            NavigationTarget::sequence::<Vec<OrderLine>>(),
        )
        .unwrap();

        assert_eq!(map.referenced_entity(), EntityType::of::<OrderLine>());
        assert!(map.kind().is_collection());
    }

    #[test]
    fn with_many_over_single_entity_is_malformed() {
        let err = RelationshipMap::new(
            customer(),
            "address",
            RelationshipKind::WithMany,
            NavigationTarget::entity::<Address>(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            MappingError::MalformedRelationship { property, .. } if property == "address"
        ));
    }

    #[test]
    fn sequence_element_through_other_containers() {
        assert_eq!(
            NavigationTarget::sequence::<VecDeque<OrderLine>>(),
            NavigationTarget::Sequence {
                container: EntityType::of::<VecDeque<OrderLine>>(),
                element: EntityType::of::<OrderLine>(),
            }
        );
    }

    #[test]
    fn join_on_accumulates_clauses() {
        let mut map = RelationshipMap::new(
            customer(),
            "address",
            RelationshipKind::HasOne,
            NavigationTarget::entity::<Address>(),
        )
        .unwrap();

        map.join_on("id", "customer_id").join_on("region", "region");

        let predicate = map.predicate().unwrap();
        assert_eq!(predicate.clauses().len(), 2);
        assert_eq!(predicate.clauses()[0].parent_field, "id");
        assert_eq!(predicate.clauses()[0].child_field, "customer_id");
    }
}
