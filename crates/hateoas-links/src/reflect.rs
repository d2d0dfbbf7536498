//! Structural reflection over live values.
//!
//! The injector walks the serialized tree in lockstep with the typed value it
//! came from. [`Reflect`] is the object-safe view of that typed value: its
//! identity, and whether it is a record (with named fields), a positional list,
//! a scalar, or absent.
//!
//! Records opt in through [`record_links!`](crate::record_links), which
//! generates the field descriptor table at compile time. Pointer-like wrappers
//! and collections from `std` are reflected here.

use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use crate::identity::{Identified, TypeIdentity};

/// Object-safe reflective view of a value.
pub trait Reflect {
    /// Identity of the value's innermost concrete type. Never reads contents.
    fn type_identity(&self) -> TypeIdentity;

    /// Structural shape of the value, after dereferencing wrappers.
    fn kind(&self) -> Kind<'_>;

    /// Whether the value's type can contain a record at any depth. Like
    /// [`type_identity`](Reflect::type_identity), answered from the type alone.
    fn may_hold_records(&self) -> bool;
}

/// Closed set of shapes a reflected value can take.
#[derive(Clone, Copy)]
pub enum Kind<'a> {
    Record(&'a dyn Record),
    List(&'a dyn List),
    Scalar,
    /// An empty optional. Its serialized form is `null`.
    Absent,
}

impl Kind<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Record(_) => "record",
            Kind::List(_) => "list",
            Kind::Scalar => "scalar",
            Kind::Absent => "absent",
        }
    }
}

/// A struct with declared, serializable fields.
pub trait Record {
    /// Declared fields with their serialization annotations.
    fn fields(&self) -> &'static [FieldDescriptor];

    /// Live value of the field with the given reflective name.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;
}

/// A collection with positional element access.
pub trait List {
    fn len(&self) -> usize;

    /// Element at `index`, or `None` when out of range.
    fn element(&self, index: usize) -> Option<&dyn Reflect>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A declared record field and its serialization annotation.
///
/// The annotation is `""` (not serialized under a known key), `"-"` (skipped),
/// or `"key[,option...]"` where only the segment before the first comma is the
/// wire key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub annotation: &'static str,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, annotation: &'static str) -> Self {
        Self { name, annotation }
    }

    /// Wire key of this field, or `None` when the annotation is empty or `-`.
    pub fn wire_key(&self) -> Option<&'static str> {
        match self.annotation {
            "" | "-" => None,
            annotation => {
                let key = annotation.split(',').next().unwrap_or(annotation);
                Some(key)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Record declaration
// ---------------------------------------------------------------------------

/// Implement [`Reflect`] and [`Record`] for a struct from its field table.
///
/// Each entry is a field name, optionally followed by `=> "annotation"`. A bare
/// field name uses the field name as its wire key, matching serde's default.
/// Fields left out of the table are never descended into.
///
/// The table is not checked against the type's serde attributes. A field
/// renamed on the wire, directly or through a container-level
/// `#[serde(rename_all = "...")]`, must carry the renamed key here or its
/// subtree is silently left without links. Prefer
/// [`derive(LinkRecord)`](crate::LinkRecord), which reads those attributes.
///
/// ```
/// use hateoas_links::{record_links, Record};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Cupcake {
///     id: u64,
///     #[serde(rename = "displayName")]
///     name: String,
///     #[serde(skip)]
///     secret: String,
/// }
///
/// record_links!(Cupcake {
///     id,
///     name => "displayName",
///     secret => "-",
/// });
///
/// let cupcake = Cupcake { id: 1, name: "a".into(), secret: String::new() };
/// assert_eq!(cupcake.fields().len(), 3);
/// assert!(cupcake.field("name").is_some());
/// ```
#[macro_export]
macro_rules! record_links {
    ($ty:ty { $($field:ident $(=> $annotation:expr)?),* $(,)? }) => {
        impl $crate::Identified for $ty {
            fn identity() -> $crate::TypeIdentity {
                $crate::TypeIdentity::named::<$ty>()
            }

            fn holds_records() -> bool {
                true
            }
        }

        impl $crate::Reflect for $ty {
            fn type_identity(&self) -> $crate::TypeIdentity {
                <$ty as $crate::Identified>::identity()
            }

            fn kind(&self) -> $crate::Kind<'_> {
                $crate::Kind::Record(self)
            }

            fn may_hold_records(&self) -> bool {
                true
            }
        }

        impl $crate::Record for $ty {
            fn fields(&self) -> &'static [$crate::FieldDescriptor] {
                const FIELDS: &[$crate::FieldDescriptor] = &[
                    $($crate::FieldDescriptor::new(
                        stringify!($field),
                        $crate::__field_annotation!($field $(, $annotation)?),
                    )),*
                ];
                FIELDS
            }

            #[allow(unused_variables)]
            fn field(&self, name: &str) -> Option<&dyn $crate::Reflect> {
                match name {
                    $(stringify!($field) => Some(&self.$field as &dyn $crate::Reflect),)*
                    _ => None,
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_annotation {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $annotation:expr) => {
        $annotation
    };
}

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

macro_rules! reflect_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identified for $ty {
                fn identity() -> TypeIdentity {
                    TypeIdentity::named::<$ty>()
                }

                fn holds_records() -> bool {
                    false
                }
            }

            impl Reflect for $ty {
                fn type_identity(&self) -> TypeIdentity {
                    <$ty as Identified>::identity()
                }

                fn kind(&self) -> Kind<'_> {
                    Kind::Scalar
                }

                fn may_hold_records(&self) -> bool {
                    false
                }
            }
        )*
    };
}

reflect_scalar!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, str, (),
);

// Dynamic payloads are opaque: their shape is only known on the wire.
reflect_scalar!(serde_json::Value);

// ---------------------------------------------------------------------------
// Pointer-like wrappers
// ---------------------------------------------------------------------------

macro_rules! reflect_pointer {
    ($($wrapper:ident),* $(,)?) => {
        $(
            impl<T: Identified + ?Sized> Identified for $wrapper<T> {
                fn identity() -> TypeIdentity {
                    T::identity()
                }

                fn holds_records() -> bool {
                    T::holds_records()
                }
            }

            impl<T: Identified + Reflect + ?Sized> Reflect for $wrapper<T> {
                fn type_identity(&self) -> TypeIdentity {
                    T::identity()
                }

                fn kind(&self) -> Kind<'_> {
                    (**self).kind()
                }

                fn may_hold_records(&self) -> bool {
                    T::holds_records()
                }
            }
        )*
    };
}

reflect_pointer!(Box, Rc, Arc);

impl<T: Identified + ?Sized> Identified for &T {
    fn identity() -> TypeIdentity {
        T::identity()
    }

    fn holds_records() -> bool {
        T::holds_records()
    }
}

impl<T: Identified + Reflect + ?Sized> Reflect for &T {
    fn type_identity(&self) -> TypeIdentity {
        T::identity()
    }

    fn may_hold_records(&self) -> bool {
        T::holds_records()
    }

    fn kind(&self) -> Kind<'_> {
        (**self).kind()
    }
}

impl<T: Identified + ?Sized> Identified for &mut T {
    fn identity() -> TypeIdentity {
        T::identity()
    }

    fn holds_records() -> bool {
        T::holds_records()
    }
}

impl<T: Identified + Reflect + ?Sized> Reflect for &mut T {
    fn type_identity(&self) -> TypeIdentity {
        T::identity()
    }

    fn may_hold_records(&self) -> bool {
        T::holds_records()
    }

    fn kind(&self) -> Kind<'_> {
        (**self).kind()
    }
}

impl<T: Identified> Identified for Option<T> {
    fn identity() -> TypeIdentity {
        T::identity()
    }

    fn holds_records() -> bool {
        T::holds_records()
    }
}

impl<T: Identified + Reflect> Reflect for Option<T> {
    fn type_identity(&self) -> TypeIdentity {
        T::identity()
    }

    fn may_hold_records(&self) -> bool {
        T::holds_records()
    }

    fn kind(&self) -> Kind<'_> {
        match self {
            Some(inner) => inner.kind(),
            None => Kind::Absent,
        }
    }
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

impl<T: Identified> Identified for Vec<T> {
    fn identity() -> TypeIdentity {
        T::identity()
    }

    fn holds_records() -> bool {
        T::holds_records()
    }
}

impl<T: Identified + Reflect> Reflect for Vec<T> {
    fn type_identity(&self) -> TypeIdentity {
        T::identity()
    }

    fn may_hold_records(&self) -> bool {
        T::holds_records()
    }

    fn kind(&self) -> Kind<'_> {
        Kind::List(self)
    }
}

impl<T: Reflect> List for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn element(&self, index: usize) -> Option<&dyn Reflect> {
        self.get(index).map(|element| element as &dyn Reflect)
    }
}

impl<T: Identified> Identified for VecDeque<T> {
    fn identity() -> TypeIdentity {
        T::identity()
    }

    fn holds_records() -> bool {
        T::holds_records()
    }
}

impl<T: Identified + Reflect> Reflect for VecDeque<T> {
    fn type_identity(&self) -> TypeIdentity {
        T::identity()
    }

    fn may_hold_records(&self) -> bool {
        T::holds_records()
    }

    fn kind(&self) -> Kind<'_> {
        Kind::List(self)
    }
}

impl<T: Reflect> List for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn element(&self, index: usize) -> Option<&dyn Reflect> {
        self.get(index).map(|element| element as &dyn Reflect)
    }
}

impl<T: Identified, const N: usize> Identified for [T; N] {
    fn identity() -> TypeIdentity {
        T::identity()
    }

    fn holds_records() -> bool {
        T::holds_records()
    }
}

impl<T: Identified + Reflect, const N: usize> Reflect for [T; N] {
    fn type_identity(&self) -> TypeIdentity {
        T::identity()
    }

    fn may_hold_records(&self) -> bool {
        T::holds_records()
    }

    fn kind(&self) -> Kind<'_> {
        Kind::List(self)
    }
}

impl<T: Reflect, const N: usize> List for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn element(&self, index: usize) -> Option<&dyn Reflect> {
        self.get(index).map(|element| element as &dyn Reflect)
    }
}

impl<T: Identified> Identified for [T] {
    fn identity() -> TypeIdentity {
        T::identity()
    }

    fn holds_records() -> bool {
        T::holds_records()
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize, Default)]
    struct Shelf {
        id: u32,
        label: Option<String>,
        items: Vec<Shelf>,
    }

    crate::record_links!(Shelf {
        id,
        label => "title,omitempty",
        items => "items",
    });

    #[test]
    fn test_wire_key_takes_first_segment() {
        assert_eq!(FieldDescriptor::new("a", "a").wire_key(), Some("a"));
        assert_eq!(
            FieldDescriptor::new("a", "b,omitempty").wire_key(),
            Some("b")
        );
        assert_eq!(FieldDescriptor::new("a", ",omitempty").wire_key(), Some(""));
    }

    #[test]
    fn test_wire_key_skips_empty_and_dash() {
        assert_eq!(FieldDescriptor::new("a", "").wire_key(), None);
        assert_eq!(FieldDescriptor::new("a", "-").wire_key(), None);
    }

    #[test]
    fn test_record_macro_builds_field_table() {
        let shelf = Shelf::default();
        assert_eq!(
            shelf.fields(),
            &[
                FieldDescriptor::new("id", "id"),
                FieldDescriptor::new("label", "title,omitempty"),
                FieldDescriptor::new("items", "items"),
            ]
        );
    }

    #[test]
    fn test_record_field_access_by_name() {
        let shelf = Shelf {
            id: 7,
            label: Some("top".to_string()),
            items: vec![Shelf::default()],
        };

        assert!(matches!(shelf.kind(), Kind::Record(_)));
        assert!(matches!(
            shelf.field("id").map(|f| f.kind()),
            Some(Kind::Scalar)
        ));
        assert!(matches!(
            shelf.field("items").map(|f| f.kind()),
            Some(Kind::List(_))
        ));
        assert!(shelf.field("missing").is_none());
    }

    #[test]
    fn test_option_kind_follows_contents() {
        let none: Option<Box<Shelf>> = None;
        assert!(matches!(none.kind(), Kind::Absent));

        let some = Some(Box::new(Shelf::default()));
        assert!(matches!(some.kind(), Kind::Record(_)));
    }

    #[test]
    fn test_list_positional_access() {
        let shelves = vec![
            Shelf {
                id: 1,
                ..Shelf::default()
            },
            Shelf {
                id: 2,
                ..Shelf::default()
            },
        ];

        let Kind::List(list) = shelves.kind() else {
            panic!("Expected list");
        };
        assert_eq!(list.len(), 2);
        assert!(list.element(1).is_some());
        assert!(list.element(2).is_none());
    }

    #[test]
    fn test_nested_list_kinds() {
        let nested = vec![vec![Shelf::default()]];
        let Kind::List(outer) = nested.kind() else {
            panic!("Expected list");
        };
        let inner = outer.element(0).expect("outer element");
        assert!(matches!(inner.kind(), Kind::List(_)));
    }

    #[test]
    fn test_scalar_kinds() {
        assert!(matches!(42u8.kind(), Kind::Scalar));
        assert!(matches!("text".kind(), Kind::Scalar));
        assert!(matches!(serde_json::json!({"a": 1}).kind(), Kind::Scalar));
        assert_eq!(Kind::Scalar.name(), "scalar");
    }
}
