//! Resolver configuration.

use serde::{Deserialize, Serialize};

/// Header key that holds the import declaration unless configured otherwise.
pub const DEFAULT_IMPORT_KEY: &str = "import";

/// Options a host may pass to the resolver.
///
/// Deserializes from camelCase JSON with every field optional, so hosts can
/// forward partial option objects unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverConfig {
    /// Header key holding the import list.
    pub import_key: String,
    /// When set, clicks without the navigation modifier never navigate.
    pub require_modifier: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            import_key: DEFAULT_IMPORT_KEY.to_string(),
            require_modifier: true,
        }
    }
}

impl ResolverConfig {
    /// Read options from a JSON value, such as LSP `initializationOptions`.
    ///
    /// `null` yields the defaults.
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value)
    }
}
