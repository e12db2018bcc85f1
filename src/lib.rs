//! # entmap: Fluent entity-to-column mapping
//!
//! Declare, once at startup, how entity struct fields map onto relational
//! column names and how entities relate to each other, so a thin data-access
//! layer can translate field access into SQL column names without per-query
//! string literals.
//!
//! The crate has three moving parts:
//!
//! - a fluent declaration API ([`EntityMapBuilder`], [`EntityMapping`]) that
//!   produces frozen [`EntityMap`] values,
//! - a process-wide [`MappingRegistry`] populated during startup and
//!   read-only afterwards,
//! - resolution hooks ([`ColumnNameResolver`], [`TableNameResolver`]) that a
//!   query-generation engine installs as its naming strategy, falling back to
//!   the engine's own [`NamingConvention`] when no mapping exists.
//!
//! No queries are executed and no I/O happens here; the crate only records
//! mapping shape for an external engine to consume.
//!
//! ```
//! use std::sync::Arc;
//! use entmap::{ColumnNameResolver, EntityMapBuilder, IdentityConvention, MappingRegistry};
//!
//! struct Customer;
//! struct Order;
//!
//! # fn main() -> entmap::MappingResult<()> {
//! let mut map = EntityMapBuilder::<Customer>::new();
//! map.map("id")?.to_column("CustomerId").key();
//! map.with_many::<Vec<Order>>("orders")?.join_on("id", "customer_id");
//!
//! let registry = Arc::new(MappingRegistry::new());
//! registry.register(map.build())?;
//!
//! let resolver = ColumnNameResolver::new(Arc::clone(&registry), IdentityConvention);
//! assert_eq!(resolver.resolve::<Customer>("id"), "CustomerId");
//! // Unmapped fields defer to the engine's convention.
//! assert_eq!(resolver.resolve::<Customer>("name"), "name");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod mapping;
pub mod registry;
pub mod resolver;

pub use error::{MappingError, MappingResult};
pub use mapping::{
    EntityMap, EntityMapBuilder, EntityMapping, EntityType, JoinClause, JoinPredicate,
    NavigationTarget, PropertyMap, RelationshipKind, RelationshipMap, Sequence,
};
pub use registry::{MappingConfiguration, MappingRegistry};
pub use resolver::{
    ColumnNameResolver, IdentityConvention, NamingConvention, SnakeCaseConvention,
    TableNameResolver,
};
