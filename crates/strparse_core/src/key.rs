//! Type identities used to key the converter cache.

use core::any::TypeId;
use core::hash::{Hash, Hasher};

/// Unique identifier for a conversion target type.
///
/// Equality and hashing use the underlying [`TypeId`] only; the type name is
/// carried for diagnostics and error messages.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Creates a `TypeKey` for the given type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    /// Creates a `TypeKey` from a raw `TypeId` and a display name.
    ///
    /// The name is informational; two keys with the same `TypeId` compare
    /// equal regardless of name.
    #[must_use]
    pub fn from_raw(id: TypeId, name: &'static str) -> Self {
        Self { id, name }
    }

    /// Returns the underlying `TypeId`.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Returns the fully qualified type name.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl core::fmt::Display for TypeKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name)
    }
}
