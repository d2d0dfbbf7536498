//! # hateoas-links
//!
//! Add HATEOAS `_links` to serialized API responses without the response
//! types knowing about links.
//!
//! Link templates are registered per type in a [`LinkRegistry`]. When a
//! response value is serialized with [`inject_links`], every record in it whose
//! type has links registered gets a `_links` map, with `{token}` placeholders
//! in each href replaced by the record's own wire-level field values.
//!
//! ```
//! use hateoas_links::{inject_links, record_links, LinkOption, LinkRegistry};
//! use serde::Serialize;
//!
//! #[derive(Serialize, Default)]
//! struct Cupcake {
//!     id: u64,
//!     name: String,
//! }
//!
//! record_links!(Cupcake { id, name });
//!
//! let registry = LinkRegistry::new();
//! registry.register(
//!     &Cupcake::default(),
//!     [
//!         LinkOption::self_link("/api/v1/cupcakes/{id}", "get a cupcake"),
//!         LinkOption::post("/api/v1/cupcakes", "create a cupcake"),
//!     ],
//! );
//!
//! let body = inject_links(&registry, &vec![Cupcake { id: 7, name: "lemon".into() }]);
//! let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
//! assert_eq!(json[0]["_links"]["self"]["href"], "/api/v1/cupcakes/7");
//! ```
//!
//! Types whose wire keys come from serde attributes can derive their field
//! table with [`LinkRecord`] instead of listing it by hand.

pub mod config;
pub mod error;
pub mod field_cache;
pub mod identity;
pub mod injector;
pub mod options;
pub mod reflect;
pub mod registry;
pub mod tokens;

pub use config::{InjectOptions, DEFAULT_LINKS_KEY};
pub use error::LinkError;
pub use hateoas_links_derive::LinkRecord;
pub use field_cache::{field_keys, field_name_for};
pub use identity::{identity_of, Identified, TypeIdentity};
pub use injector::{
    inject_links, inject_links_with, inject_value, try_inject_links, try_inject_links_with,
};
pub use options::{LinkOption, LinkSet, LinkTemplate, Method};
pub use reflect::{FieldDescriptor, Kind, List, Record, Reflect};
pub use registry::{register, register_on, LinkRegistry};
