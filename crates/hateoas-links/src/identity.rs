//! Type identity: the registry key for link templates.
//!
//! An identity names the innermost concrete type of a value after stripping
//! every pointer-like wrapper (`&T`, `Box<T>`, `Option<T>`, `Arc<T>`, ...) and
//! every collection level (`Vec<T>`, `[T; N]`, `VecDeque<T>`). It is computed
//! from the type alone, so `None` and empty collections still report the
//! identity of the record they would hold.

use std::any::TypeId;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::reflect::Reflect;

/// Canonical, wrapper-insensitive identity of a concrete type.
///
/// Equality, ordering and hashing use the type's [`TypeId`]. The type name is
/// kept only for display and logs, since it is not guaranteed to be unique.
///
/// `TypeIdentity::default()` is the empty identity. It never matches a
/// registered record.
#[derive(Debug, Clone, Copy)]
pub struct TypeIdentity {
    id: TypeId,
    name: &'static str,
}

/// Uninhabited marker backing the empty identity.
enum Unnamed {}

impl TypeIdentity {
    /// Identity of the type `T` itself, without unwrapping.
    ///
    /// Used by [`Identified`] implementations of leaf types; wrappers forward
    /// to their inner type instead.
    pub fn named<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Identity of `T` after stripping wrappers and collections.
    pub fn of<T: Identified + ?Sized>() -> Self {
        T::identity()
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn as_str(&self) -> &'static str {
        self.name
    }

    pub fn is_empty(&self) -> bool {
        self.id == TypeId::of::<Unnamed>()
    }
}

impl Default for TypeIdentity {
    fn default() -> Self {
        Self {
            id: TypeId::of::<Unnamed>(),
            name: "",
        }
    }
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeIdentity {}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for TypeIdentity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeIdentity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Type-level identity. Implemented by leaf types with their own name and by
/// wrappers and collections by forwarding to the element type.
pub trait Identified {
    fn identity() -> TypeIdentity;

    /// Whether values of this type can contain a record at any depth. Leaf
    /// scalars answer `false`; wrappers and collections forward to their
    /// element type.
    fn holds_records() -> bool;
}

/// Identity of a live value. Never inspects the value's contents.
pub fn identity_of<T: Reflect + ?Sized>(value: &T) -> TypeIdentity {
    value.type_identity()
}
