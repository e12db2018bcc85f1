//! Entity Type Identity - Reflection-free stand-in for runtime type objects

use std::any::TypeId;
use std::fmt;

/// Identifies an entity type by its `TypeId`, keeping the compiler-reported
/// type name alongside for diagnostics and naming conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityType {
    id: TypeId,
    name: &'static str,
}

impl EntityType {
    /// Capture the identity of entity type `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The type id used as the registry key.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, as reported by the compiler.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path.
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Customer;

    #[test]
    fn identity_is_per_type() {
        assert_eq!(EntityType::of::<Customer>(), EntityType::of::<Customer>());
        assert_ne!(EntityType::of::<Customer>(), EntityType::of::<String>());
        assert_eq!(EntityType::of::<Customer>().id(), TypeId::of::<Customer>());
    }

    #[test]
    fn short_name_strips_module_path() {
        let entity = EntityType::of::<Customer>();
        assert_eq!(entity.short_name(), "Customer");
        assert!(entity.name().ends_with("::Customer"));
        assert_eq!(entity.to_string(), "Customer");
    }
}
