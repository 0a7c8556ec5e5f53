//! Resolved scope handed to computed properties.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{ConfigError, ConfigResult};

/// Values resolved so far, layered innermost (current branch) to outermost
/// (root).
///
/// Lookups search the innermost layer first, so a sibling shadows an
/// ancestor member of the same name.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    owner: &'a str,
    values: &'a Map<String, Value>,
    parent: Option<&'a Scope<'a>>,
}

impl<'a> Scope<'a> {
    pub(crate) const fn new(
        owner: &'a str,
        values: &'a Map<String, Value>,
        parent: Option<&'a Scope<'a>>,
    ) -> Self {
        Self {
            owner,
            values,
            parent,
        }
    }

    /// Dotted path of the node this scope was built for.
    #[must_use]
    pub const fn owner(&self) -> &str {
        self.owner
    }

    /// Values resolved in the current branch before the node being
    /// evaluated.
    #[must_use]
    pub const fn siblings(&self) -> &Map<String, Value> {
        self.values
    }

    /// The enclosing branch's scope, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<&Scope<'a>> {
        self.parent
    }

    /// Find `name` in this scope or any ancestor.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .get(name)
            .or_else(|| self.parent.and_then(|parent| parent.get(name)))
    }

    /// Find `name`, failing when it has not been resolved.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnresolvedReference`] when `name` is not in
    /// scope.
    pub fn require(&self, name: &str) -> ConfigResult<&Value> {
        self.get(name).ok_or_else(|| {
            Arc::new(ConfigError::UnresolvedReference {
                path: self.owner.to_owned(),
                reference: name.to_owned(),
            })
        })
    }

    /// Find `name` and deserialise it into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnresolvedReference`] when `name` is not in
    /// scope and [`ConfigError::Deserialize`] when the value has the wrong
    /// shape.
    pub fn require_as<T: DeserializeOwned>(&self, name: &str) -> ConfigResult<T> {
        let value = self.require(name)?;
        serde_json::from_value(value.clone())
            .map_err(|source| Arc::new(ConfigError::Deserialize { source }))
    }

    /// Flatten all layers into one object, inner layers winning.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut merged = self
            .parent
            .map_or_else(Map::new, |parent| match parent.to_value() {
                Value::Object(map) => map,
                _ => Map::new(),
            });
        for (name, value) in self.values {
            merged.insert(name.clone(), value.clone());
        }
        Value::Object(merged)
    }
}
