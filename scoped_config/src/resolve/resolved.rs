//! The finished configuration tree.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{ConfigResult, ConfigResultExt};

use super::ValueSource;
use super::value::lookup_path;

/// Resolved configuration mirroring the schema's shape and order.
///
/// # Examples
///
/// ```
/// use scoped_config::{
///     Branch, CommandLineArgs, Environment, LeafDefinition, Schema, ValueSource, resolve,
/// };
/// use serde_json::json;
///
/// let schema = Schema::new(
///     Branch::new().branch("server", Branch::new().leaf("port", LeafDefinition::new().default_value(8081))),
/// )?;
/// let resolved = resolve(&schema, &CommandLineArgs::new(), &Environment::new(), &json!({}))?;
/// assert_eq!(resolved.get("server.port"), Some(&json!(8081)));
/// assert_eq!(resolved.source_of("server.port"), Some(ValueSource::Default));
/// # Ok::<_, std::sync::Arc<scoped_config::ConfigError>>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    tree: Map<String, Value>,
    provenance: BTreeMap<String, ValueSource>,
}

impl ResolvedConfig {
    pub(crate) const fn new(
        tree: Map<String, Value>,
        provenance: BTreeMap<String, ValueSource>,
    ) -> Self {
        Self { tree, provenance }
    }

    /// Look up a value by dotted path, for example `server.port`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let segments: Vec<&str> = path.split('.').collect();
        let (first, rest) = segments.split_first()?;
        lookup_path(self.tree.get(*first)?, rest)
    }

    /// Source that supplied the leaf or computed value at `path`.
    #[must_use]
    pub fn source_of(&self, path: &str) -> Option<ValueSource> {
        self.provenance.get(path).copied()
    }

    /// Iterate dotted paths with their sources, sorted by path.
    pub fn provenance(&self) -> impl Iterator<Item = (&str, ValueSource)> {
        self.provenance
            .iter()
            .map(|(path, source)| (path.as_str(), *source))
    }

    /// Borrow the resolved tree.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.tree
    }

    /// Consume into a JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.tree)
    }

    /// Deserialise the tree into an application type.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Deserialize`] when the tree does not
    /// match `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> ConfigResult<T> {
        serde_json::from_value(Value::Object(self.tree.clone())).into_config()
    }
}
