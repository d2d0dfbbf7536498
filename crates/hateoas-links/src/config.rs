//! Configuration for link injection.

use serde::{Deserialize, Serialize};

/// Key under which the concrete link map is written on every decorated node.
pub const DEFAULT_LINKS_KEY: &str = "_links";

/// Options for link injection.
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g., `links-key`, `max-depth`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct InjectOptions {
    /// Key the link map is stored under. Default: `_links`.
    pub links_key: String,
    /// Maximum nesting depth the walker descends into. Nodes below this depth
    /// are emitted as serialized, without links.
    pub max_depth: usize,
    /// Emit pretty-printed JSON instead of the compact form.
    pub pretty: bool,
}

impl Default for InjectOptions {
    fn default() -> Self {
        Self {
            links_key: DEFAULT_LINKS_KEY.to_string(),
            max_depth: 128,
            pretty: false,
        }
    }
}
