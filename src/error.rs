//! Error types for the mapping system
//!
//! Every variant is a programmer error in a mapping declaration, intended to
//! abort startup so the declaration gets fixed. Absence of a mapping at
//! resolution time is never an error; the resolver falls back to the
//! engine-supplied naming convention instead.

use thiserror::Error;

/// Result type alias for mapping operations
pub type MappingResult<T> = Result<T, MappingError>;

/// Error types for mapping declaration and registration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// A property or relationship was mapped twice for the same entity type
    #[error("duplicate mapping detected: property '{property}' on entity '{entity}' is already mapped")]
    DuplicateMapping {
        entity: &'static str,
        property: String,
    },

    /// An entity type was registered twice; the first map stays in place
    #[error("duplicate registration: entity '{entity}' already has a registered map")]
    DuplicateRegistration { entity: &'static str },

    /// A `with_many` navigation property is not a sequence type
    #[error("malformed relationship: navigation property '{property}' on entity '{entity}' is not a sequence type")]
    MalformedRelationship {
        entity: &'static str,
        property: String,
    },
}
