//! Link injector: walks the serialized tree in lockstep with the typed value.
//!
//! The value is serialized, parsed back into a generic [`Value`] tree, and
//! walked depth-first alongside its [`Reflect`] view:
//!
//! - an array is paired element by element with a reflected list,
//! - an object is paired with a reflected record; if the record's type has
//!   links registered, a link map is written under the links key, then every
//!   nested object or array is paired with the field its wire key resolves to.
//!
//! Any pairing that cannot be made (unknown key, absent value, shape mismatch,
//! index out of range) is skipped. Injection never fails on structure; the
//! worst case is a node without links.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::InjectOptions;
use crate::error::LinkError;
use crate::field_cache;
use crate::identity::TypeIdentity;
use crate::options::LinkSet;
use crate::reflect::{Kind, Reflect};
use crate::registry::LinkRegistry;

/// Serialize `value` with links injected at every registered record.
///
/// Never fails: if serialization itself fails, a warning is logged and `null`
/// is returned so the response pipeline always has valid JSON to emit. Once
/// the plain serialization exists, any later failure falls back to it.
pub fn inject_links<T>(registry: &LinkRegistry, value: &T) -> Vec<u8>
where
    T: Reflect + Serialize,
{
    inject_links_with(registry, value, &InjectOptions::default())
}

/// [`inject_links`] with explicit options.
pub fn inject_links_with<T>(registry: &LinkRegistry, value: &T, options: &InjectOptions) -> Vec<u8>
where
    T: Reflect + Serialize,
{
    match try_inject_links_with(registry, value, options) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(
                identity = %value.type_identity(),
                error = %err,
                "serialization failed, emitting null"
            );
            b"null".to_vec()
        }
    }
}

/// Serialize `value` with links injected, surfacing serializer errors.
pub fn try_inject_links<T>(registry: &LinkRegistry, value: &T) -> Result<Vec<u8>, LinkError>
where
    T: Reflect + Serialize,
{
    try_inject_links_with(registry, value, &InjectOptions::default())
}

/// [`try_inject_links`] with explicit options.
///
/// Only the initial serialization of `value` can fail. Errors while
/// re-reading or re-encoding the tree are logged and the plain serialization
/// is returned instead.
pub fn try_inject_links_with<T>(
    registry: &LinkRegistry,
    value: &T,
    options: &InjectOptions,
) -> Result<Vec<u8>, LinkError>
where
    T: Reflect + Serialize,
{
    let raw = encode(value, options.pretty)?;

    // Only records, and lists that can hold them, carry links; everything
    // else is emitted as-is.
    let kind = value.kind();
    if !matches!(kind, Kind::Record(_) | Kind::List(_)) || !value.may_hold_records() {
        tracing::trace!(
            identity = %value.type_identity(),
            kind = kind.name(),
            "value cannot carry links, emitting plain serialization"
        );
        return Ok(raw);
    }

    match reinject(registry, value, &raw, options) {
        Ok(bytes) => Ok(bytes),
        Err(err) => {
            tracing::warn!(
                identity = %value.type_identity(),
                error = %err,
                "link injection failed, emitting plain serialization"
            );
            Ok(raw)
        }
    }
}

/// Parse the emitted bytes so the walk sees exactly the wire shape,
/// including serde renames, skips and custom serializers.
fn reinject(
    registry: &LinkRegistry,
    value: &dyn Reflect,
    raw: &[u8],
    options: &InjectOptions,
) -> Result<Vec<u8>, LinkError> {
    // The input already serialized at this depth; re-reading it must not
    // impose a tighter bound.
    let mut deserializer = serde_json::Deserializer::from_slice(raw);
    deserializer.disable_recursion_limit();
    let mut tree = Value::deserialize(&mut deserializer)?;
    deserializer.end()?;

    inject_value(registry, value, &mut tree, options);
    encode(&tree, options.pretty)
}

/// Inject links into an already-serialized `tree` of `value`, in place.
///
/// Running it twice on the same tree rewrites each link map with an identical
/// one.
pub fn inject_value(
    registry: &LinkRegistry,
    value: &dyn Reflect,
    tree: &mut Value,
    options: &InjectOptions,
) {
    let links = registry.read();
    let walker = Walker {
        links: &links,
        options,
    };
    walker.walk(value, tree, 0);
}

fn encode<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<Vec<u8>, LinkError> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };
    Ok(bytes)
}

// ---------------------------------------------------------------------------
// Recursive walker
// ---------------------------------------------------------------------------

struct Walker<'a> {
    links: &'a HashMap<TypeIdentity, LinkSet>,
    options: &'a InjectOptions,
}

impl Walker<'_> {
    fn walk(&self, value: &dyn Reflect, node: &mut Value, depth: usize) {
        if depth > self.options.max_depth {
            tracing::debug!(
                depth,
                max_depth = self.options.max_depth,
                "maximum depth reached, leaving subtree untouched"
            );
            return;
        }

        match node {
            Value::Array(items) => self.walk_list(value, items, depth),
            Value::Object(obj) => self.walk_record(value, obj, depth),
            _ => {}
        }
    }

    /// Pair each generic element with the reflected element at the same index.
    /// Nested lists unwrap one level on both sides per call.
    fn walk_list(&self, value: &dyn Reflect, items: &mut [Value], depth: usize) {
        let list = match value.kind() {
            Kind::List(list) => list,
            other => {
                tracing::trace!(
                    identity = %value.type_identity(),
                    kind = other.name(),
                    "array on the wire is not a list in the value, skipping"
                );
                return;
            }
        };

        for (index, item) in items.iter_mut().enumerate() {
            match list.element(index) {
                Some(element) => self.walk(element, item, depth + 1),
                None => {
                    tracing::trace!(index, len = list.len(), "list index out of range, skipping");
                }
            }
        }
    }

    fn walk_record(&self, value: &dyn Reflect, obj: &mut Map<String, Value>, depth: usize) {
        // `null` embedded records and mismatched shapes end up here empty.
        if obj.is_empty() {
            return;
        }

        let record = match value.kind() {
            Kind::Record(record) => record,
            other => {
                tracing::trace!(
                    identity = %value.type_identity(),
                    kind = other.name(),
                    "object on the wire is not a record in the value, skipping"
                );
                return;
            }
        };

        let identity = value.type_identity();
        let injected = self.inject_on(identity, obj);

        let keys = field_cache::keys_for(identity, record);
        for (key, child) in obj.iter_mut() {
            if injected && *key == self.options.links_key {
                continue;
            }
            if !(child.is_object() || child.is_array()) {
                continue;
            }

            let Some(field_name) = keys.get(key.as_str()) else {
                tracing::trace!(identity = %identity, key = %key, "no field for serialized key");
                continue;
            };
            let Some(field) = record.field(field_name) else {
                tracing::trace!(identity = %identity, field = *field_name, "field not reflected");
                continue;
            };

            self.walk(field, child, depth + 1);
        }
    }

    /// Write the resolved link map for `identity` into `obj`. Returns whether
    /// anything was written.
    fn inject_on(&self, identity: TypeIdentity, obj: &mut Map<String, Value>) -> bool {
        let links = match self.links.get(&identity) {
            Some(links) if !links.is_empty() => links,
            _ => return false,
        };

        let mut link_map = Map::with_capacity(links.len());
        for (name, template) in links {
            link_map.insert(name.clone(), template.resolve(obj).to_value());
        }

        obj.insert(self.options.links_key.clone(), Value::Object(link_map));
        true
    }
}
