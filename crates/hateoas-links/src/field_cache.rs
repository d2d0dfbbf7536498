//! Field-name cache: wire key → reflective field name, per record type.
//!
//! Built once per [`TypeIdentity`] from the record's declared fields and shared
//! process-wide. Concurrent first lookups may build the same table twice; the
//! first one stored wins and both are identical.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;

use crate::error::LinkError;
use crate::identity::TypeIdentity;
use crate::reflect::{FieldDescriptor, Kind, Record, Reflect};

/// Wire key → reflective field name.
pub type FieldKeys = HashMap<&'static str, &'static str>;

static FIELD_NAMES: LazyLock<DashMap<TypeIdentity, Arc<FieldKeys>>> =
    LazyLock::new(DashMap::new);

/// Reflective name of the field serialized under `key`.
///
/// `Ok(None)` when no declared field uses that key. Fails when `value` is not
/// a record after dereferencing.
pub fn field_name_for(value: &dyn Reflect, key: &str) -> Result<Option<&'static str>, LinkError> {
    let keys = field_keys(value)?;
    Ok(keys.get(key).copied())
}

/// The full wire key → field name table for the record type of `value`.
pub fn field_keys(value: &dyn Reflect) -> Result<Arc<FieldKeys>, LinkError> {
    let identity = value.type_identity();
    match value.kind() {
        Kind::Record(record) => Ok(keys_for(identity, record)),
        _ => Err(LinkError::NotARecord { identity }),
    }
}

/// Cached table for `record`, building it on first use.
pub(crate) fn keys_for(identity: TypeIdentity, record: &dyn Record) -> Arc<FieldKeys> {
    if let Some(cached) = FIELD_NAMES.get(&identity) {
        return Arc::clone(cached.value());
    }

    let keys = Arc::new(build_field_keys(record.fields()));
    tracing::trace!(identity = %identity, fields = keys.len(), "cached field names");

    let entry = FIELD_NAMES.entry(identity).or_insert(keys);
    Arc::clone(entry.value())
}

/// Fields without a wire key are left out. On duplicate keys the last field
/// wins.
fn build_field_keys(fields: &[FieldDescriptor]) -> FieldKeys {
    let mut keys = FieldKeys::with_capacity(fields.len());
    for field in fields {
        if let Some(key) = field.wire_key() {
            keys.insert(key, field.name);
        }
    }
    keys
}
