//! Schema model: leaves, branches and computed nodes.
//!
//! A [`Schema`] is a validated root [`Branch`]. Nodes are tagged up front as
//! one of the three [`SchemaNode`] variants, either through the builder API
//! or by classifying a JSON document with [`Schema::from_value`].
//!
//! ```rust
//! use scoped_config::{Branch, Computed, LeafDefinition, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::new(
//!     Branch::new().branch(
//!         "socket",
//!         Branch::new()
//!             .leaf("host", LeafDefinition::new().default_value("localhost"))
//!             .leaf("port", LeafDefinition::new().default_value(8081))
//!             .computed(
//!                 "address",
//!                 Computed::new(["host", "port"], |scope| {
//!                     Ok(json!(format!(
//!                         "{}:{}",
//!                         scope.require_as::<String>("host")?,
//!                         scope.require_as::<u16>("port")?
//!                     )))
//!                 }),
//!             ),
//!     ),
//! )?;
//! assert_eq!(schema.leaves().len(), 2);
//! # Ok::<_, std::sync::Arc<scoped_config::ConfigError>>(())
//! ```

mod classify;
mod computed;
mod leaf;
mod validate;

pub use computed::{ComputeFn, Computed};
pub use leaf::{EnvVarParser, LeafDefinition, TransformFn};

use serde_json::Value;

use crate::ConfigResult;

/// One node of the schema tree.
#[derive(Clone, Debug)]
pub enum SchemaNode {
    /// A single configurable property.
    Leaf(LeafDefinition),
    /// A nested namespace.
    Branch(Branch),
    /// A property derived from previously resolved values.
    Computed(Computed),
}

impl From<LeafDefinition> for SchemaNode {
    fn from(leaf: LeafDefinition) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<Branch> for SchemaNode {
    fn from(branch: Branch) -> Self {
        Self::Branch(branch)
    }
}

impl From<Computed> for SchemaNode {
    fn from(computed: Computed) -> Self {
        Self::Computed(computed)
    }
}

/// Ordered mapping from member name to child node.
#[derive(Clone, Debug, Default)]
pub struct Branch {
    members: Vec<(String, SchemaNode)>,
}

impl Branch {
    /// Create an empty branch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Classify a JSON object into a branch without validating it.
    ///
    /// Use this to load the static part of a schema from a document and then
    /// attach computed nodes before calling [`Schema::new`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::SchemaShape`] when a node cannot be
    /// classified.
    pub fn from_value(value: &Value) -> ConfigResult<Self> {
        classify::classify_root(value)
    }

    /// Add or replace a member, keeping the position of a replaced member.
    #[must_use]
    pub fn node(mut self, name: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        let name = name.into();
        let node = node.into();
        match self.members.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = node,
            None => self.members.push((name, node)),
        }
        self
    }

    /// Add a leaf member.
    #[must_use]
    pub fn leaf(self, name: impl Into<String>, leaf: LeafDefinition) -> Self {
        self.node(name, leaf)
    }

    /// Add a nested branch.
    #[must_use]
    pub fn branch(self, name: impl Into<String>, branch: Self) -> Self {
        self.node(name, branch)
    }

    /// Add a computed member.
    #[must_use]
    pub fn computed(self, name: impl Into<String>, computed: Computed) -> Self {
        self.node(name, computed)
    }

    /// Rewrite the nested branch `name` with `f`. Members that are missing or
    /// not branches are left untouched.
    #[must_use]
    pub fn map_branch<F>(mut self, name: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if let Some((_, slot)) = self.members.iter_mut().find(|(existing, _)| existing == name)
            && let SchemaNode::Branch(inner) = slot
        {
            let taken = std::mem::take(inner);
            *inner = f(taken);
        }
        self
    }

    /// Look up a direct member.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.members
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, node)| node)
    }

    /// Iterate members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.members.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Number of direct members.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the branch has no members.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn collect_leaves<'s>(&'s self, prefix: &str, out: &mut Vec<(String, &'s LeafDefinition)>) {
        for (name, node) in self.members() {
            let path = join_path(prefix, name);
            match node {
                SchemaNode::Leaf(leaf) => out.push((path, leaf)),
                SchemaNode::Branch(inner) => inner.collect_leaves(&path, out),
                SchemaNode::Computed(_) => {}
            }
        }
    }
}

/// A validated schema tree.
#[derive(Clone, Debug)]
pub struct Schema {
    root: Branch,
}

impl Schema {
    /// Validate `root` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::ForwardReference`] when a computed node
    /// requires a property that is not resolved before it, and
    /// [`crate::ConfigError::SchemaShape`] for empty names, empty delimiters,
    /// empty `values` sets, distinct command-line arguments sharing one flag, or use of the
    /// reserved `deployConfig` argument.
    pub fn new(root: Branch) -> ConfigResult<Self> {
        validate::validate(&root)?;
        Ok(Self { root })
    }

    /// Classify and validate a JSON schema document.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Branch::from_value`] and [`Schema::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use scoped_config::Schema;
    /// use serde_json::json;
    ///
    /// let schema = Schema::from_value(&json!({
    ///     "server": {
    ///         "protocol": { "default": "ws", "values": ["ws", "wss"], "envVar": "PROTOCOL" },
    ///         "tags": { "envVar": "TAGS", "envVarParser": "," }
    ///     }
    /// }))?;
    /// assert_eq!(schema.leaves().len(), 2);
    /// # Ok::<_, std::sync::Arc<scoped_config::ConfigError>>(())
    /// ```
    pub fn from_value(value: &Value) -> ConfigResult<Self> {
        Self::new(Branch::from_value(value)?)
    }

    /// Root namespace.
    #[must_use]
    pub const fn root(&self) -> &Branch {
        &self.root
    }

    /// All leaves with their dotted paths, in declaration order.
    #[must_use]
    pub fn leaves(&self) -> Vec<(String, &LeafDefinition)> {
        let mut out = Vec::new();
        self.root.collect_leaves("", &mut out);
        out
    }
}

pub(crate) fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

#[cfg(test)]
mod tests;
