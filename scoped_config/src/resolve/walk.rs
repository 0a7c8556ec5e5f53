//! Recursive schema walk.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::ConfigResult;
use crate::schema::{Branch, SchemaNode};

use super::value::{LeafInputs, resolve_leaf};
use super::{Scope, ValueSource};

pub(crate) struct Walker<'a> {
    inputs: LeafInputs<'a>,
    provenance: BTreeMap<String, ValueSource>,
}

impl<'a> Walker<'a> {
    pub(crate) const fn new(inputs: LeafInputs<'a>) -> Self {
        Self {
            inputs,
            provenance: BTreeMap::new(),
        }
    }

    pub(crate) fn into_provenance(self) -> BTreeMap<String, ValueSource> {
        self.provenance
    }

    /// Resolve `branch` in two passes.
    ///
    /// Leaves and nested branches resolve first, in declaration order; each
    /// nested branch sees the plain siblings resolved before it. Computed
    /// members then run in declaration order against the siblings declared
    /// before them. The returned map follows declaration order.
    pub(crate) fn walk_branch<'s>(
        &mut self,
        branch: &'s Branch,
        path: &mut Vec<&'s str>,
        outer: Option<&Scope<'_>>,
    ) -> ConfigResult<Map<String, Value>> {
        let mut plain = Map::new();
        for (name, node) in branch.members() {
            path.push(name);
            let entry = match node {
                SchemaNode::Leaf(leaf) => {
                    let (value, source) = resolve_leaf(leaf, path.as_slice(), self.inputs)?;
                    self.provenance.insert(path.join("."), source);
                    Some(value)
                }
                SchemaNode::Branch(inner) => {
                    let owner = path.join(".");
                    let scope = Scope::new(&owner, &plain, outer);
                    Some(Value::Object(self.walk_branch(inner, path, Some(&scope))?))
                }
                SchemaNode::Computed(_) => None,
            };
            path.pop();
            if let Some(value) = entry {
                plain.insert(name.to_owned(), value);
            }
        }

        let mut resolved = Map::new();
        for (name, node) in branch.members() {
            let value = match node {
                SchemaNode::Computed(computed) => {
                    path.push(name);
                    let owner = path.join(".");
                    path.pop();
                    let value = computed.evaluate(&Scope::new(&owner, &resolved, outer))?;
                    self.provenance.insert(owner, ValueSource::Computed);
                    value
                }
                _ => plain.remove(name).unwrap_or(Value::Null),
            };
            resolved.insert(name.to_owned(), value);
        }
        Ok(resolved)
    }
}
