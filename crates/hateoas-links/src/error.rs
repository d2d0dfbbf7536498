//! Error types for link registration and injection.

use thiserror::Error;

use crate::identity::TypeIdentity;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Type {identity} is not a record, it has no serialized field names")]
    NotARecord { identity: TypeIdentity },

    #[error("Unknown HTTP method: {0}")]
    UnknownMethod(String),
}
