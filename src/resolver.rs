//! Name Resolution - The lookup hooks a query-generation engine installs
//!
//! [`ColumnNameResolver`] and [`TableNameResolver`] consult the frozen
//! [`MappingRegistry`] first and defer to an engine-supplied
//! [`NamingConvention`] on any miss. Resolution never errors: absence of a
//! mapping is the normal case, not a failure.

use std::fmt;
use std::sync::Arc;

use convert_case::{Case, Casing};
use tracing::trace;

use crate::mapping::EntityType;
use crate::registry::MappingRegistry;

/// Fallback naming rule supplied by the query-generation engine, consulted
/// when no explicit mapping exists. This crate never invents its own
/// fallback; the engine decides.
pub trait NamingConvention: Send + Sync {
    /// Column name for an unmapped field.
    fn column_name(&self, entity: EntityType, field: &str) -> String;

    /// Table name for an unmapped entity. Defaults to the short type name.
    fn table_name(&self, entity: EntityType) -> String {
        entity.short_name().to_string()
    }
}

/// Uses field names verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConvention;

impl NamingConvention for IdentityConvention {
    fn column_name(&self, _entity: EntityType, field: &str) -> String {
        field.to_string()
    }
}

/// snake_cases field and type names.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnakeCaseConvention;

impl NamingConvention for SnakeCaseConvention {
    fn column_name(&self, _entity: EntityType, field: &str) -> String {
        field.to_case(Case::Snake)
    }

    fn table_name(&self, entity: EntityType) -> String {
        entity.short_name().to_case(Case::Snake)
    }
}

/// Resolves entity fields to column names against the frozen registry.
///
/// Pure lookups over immutable state; safe for high-frequency concurrent
/// use once registration has completed.
pub struct ColumnNameResolver {
    registry: Arc<MappingRegistry>,
    fallback: Box<dyn NamingConvention>,
}

impl ColumnNameResolver {
    pub fn new(registry: Arc<MappingRegistry>, fallback: impl NamingConvention + 'static) -> Self {
        Self {
            registry,
            fallback: Box::new(fallback),
        }
    }

    /// Column name for `field` on entity `T`.
    ///
    /// Returns the mapped column when the entity is registered, the field is
    /// mapped and not ignored; the fallback convention's answer otherwise.
    pub fn resolve<T: 'static>(&self, field: &str) -> String {
        self.resolve_erased(EntityType::of::<T>(), field)
    }

    /// Erased variant for engines that carry an [`EntityType`] at runtime.
    pub fn resolve_erased(&self, entity: EntityType, field: &str) -> String {
        if let Some(map) = self.registry.try_get_by_id(entity.id()) {
            if let Some(property) = map.property_map(field) {
                if !property.is_ignored() {
                    trace!(%entity, field, column = property.column_name(), "resolved mapped column");
                    return property.column_name().to_string();
                }
            }
        }
        trace!(%entity, field, "no mapping, deferring to naming convention");
        self.fallback.column_name(entity, field)
    }
}

impl fmt::Debug for ColumnNameResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnNameResolver")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Resolves entity types to table names with the same registry-then-fallback
/// shape as [`ColumnNameResolver`].
pub struct TableNameResolver {
    registry: Arc<MappingRegistry>,
    fallback: Box<dyn NamingConvention>,
}

impl TableNameResolver {
    pub fn new(registry: Arc<MappingRegistry>, fallback: impl NamingConvention + 'static) -> Self {
        Self {
            registry,
            fallback: Box::new(fallback),
        }
    }

    /// Table name for entity `T`.
    pub fn resolve<T: 'static>(&self) -> String {
        self.resolve_erased(EntityType::of::<T>())
    }

    /// Erased variant for engines that carry an [`EntityType`] at runtime.
    pub fn resolve_erased(&self, entity: EntityType) -> String {
        if let Some(map) = self.registry.try_get_by_id(entity.id()) {
            if let Some(table) = map.table_name() {
                trace!(%entity, table, "resolved mapped table");
                return table.to_string();
            }
        }
        self.fallback.table_name(entity)
    }
}

impl fmt::Debug for TableNameResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableNameResolver")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::EntityMapBuilder;

    struct Customer;
    struct Order;

    fn registry() -> Arc<MappingRegistry> {
        let mut builder = EntityMapBuilder::<Customer>::new();
        builder.to_table("Customers");
        builder.map("id").unwrap().to_column("CustomerId").key();
        builder.map("internal_notes").unwrap().ignore();

        let registry = MappingRegistry::new();
        registry.register(builder.build()).unwrap();
        Arc::new(registry)
    }

    #[test]
    fn mapped_field_resolves_to_declared_column() {
        let resolver = ColumnNameResolver::new(registry(), IdentityConvention);
        assert_eq!(resolver.resolve::<Customer>("id"), "CustomerId");
    }

    #[test]
    fn unmapped_field_falls_back() {
        let resolver = ColumnNameResolver::new(registry(), IdentityConvention);
        assert_eq!(resolver.resolve::<Customer>("name"), "name");
    }

    #[test]
    fn unmapped_entity_falls_back() {
        let resolver = ColumnNameResolver::new(registry(), IdentityConvention);
        assert_eq!(resolver.resolve::<Order>("id"), "id");
    }

    #[test]
    fn ignored_field_falls_back() {
        let resolver = ColumnNameResolver::new(registry(), SnakeCaseConvention);
        assert_eq!(
            resolver.resolve::<Customer>("internal_notes"),
            "internal_notes"
        );
    }

    #[test]
    fn snake_case_convention() {
        let resolver = ColumnNameResolver::new(Arc::new(MappingRegistry::new()), SnakeCaseConvention);
        assert_eq!(resolver.resolve::<Customer>("CreatedAt"), "created_at");
    }

    #[test]
    fn erased_resolution_matches_typed() {
        let resolver = ColumnNameResolver::new(registry(), IdentityConvention);
        assert_eq!(
            resolver.resolve_erased(EntityType::of::<Customer>(), "id"),
            "CustomerId"
        );
    }

    #[test]
    fn table_resolution_prefers_mapping_then_convention() {
        let tables = TableNameResolver::new(registry(), SnakeCaseConvention);
        assert_eq!(tables.resolve::<Customer>(), "Customers");
        assert_eq!(tables.resolve::<Order>(), "order");
    }

    #[test]
    fn default_table_convention_is_short_type_name() {
        let tables = TableNameResolver::new(registry(), IdentityConvention);
        assert_eq!(tables.resolve::<Order>(), "Order");
    }
}
