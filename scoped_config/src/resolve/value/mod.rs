//! Per-leaf source selection, parsing and validation.

use std::sync::Arc;

use serde_json::Value;

use crate::schema::LeafDefinition;
use crate::sources::{CommandLineArgs, Environment};
use crate::{ConfigError, ConfigResult};

use super::ValueSource;

/// Raw inputs consulted for every leaf.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LeafInputs<'a> {
    pub(crate) cli: &'a CommandLineArgs,
    pub(crate) env: &'a Environment,
    pub(crate) tree: &'a Value,
}

/// Resolve one leaf at `path`.
///
/// Precedence: command line, environment, tree, default. Values from the
/// first three are checked against `values`; defaults are trusted.
pub(crate) fn resolve_leaf(
    leaf: &LeafDefinition,
    path: &[&str],
    inputs: LeafInputs<'_>,
) -> ConfigResult<(Value, ValueSource)> {
    let key = path.join(".");
    let (value, source) = pick_candidate(leaf, path, &key, inputs)?;
    if source.is_external() {
        check_membership(leaf, &key, &value)?;
    }
    Ok((value, source))
}

fn pick_candidate(
    leaf: &LeafDefinition,
    path: &[&str],
    key: &str,
    inputs: LeafInputs<'_>,
) -> ConfigResult<(Value, ValueSource)> {
    if let Some(value) = leaf
        .get_command_line_arg()
        .and_then(|arg| inputs.cli.get(arg))
    {
        return Ok((value.clone(), ValueSource::CommandLine));
    }
    if let Some(var) = leaf.get_env_var()
        && let Some(raw) = inputs.env.get(var)
    {
        return parse_env(leaf, key, var, raw).map(|value| (value, ValueSource::Environment));
    }
    if let Some(value) = lookup_path(inputs.tree, path) {
        return Ok((value.clone(), ValueSource::DeployConfig));
    }
    Ok((leaf.get_default().clone(), ValueSource::Default))
}

fn parse_env(leaf: &LeafDefinition, key: &str, var: &str, raw: &str) -> ConfigResult<Value> {
    match leaf.get_env_var_parser() {
        Some(parser) => parser.parse(raw).map_err(|source| {
            Arc::new(ConfigError::MalformedEnvValue {
                key: key.to_owned(),
                var: var.to_owned(),
                source,
            })
        }),
        None => Ok(Value::String(raw.to_owned())),
    }
}

fn check_membership(leaf: &LeafDefinition, key: &str, value: &Value) -> ConfigResult<()> {
    match leaf.get_values() {
        Some(allowed) if !allowed.contains(value) => Err(Arc::new(ConfigError::InvalidEnumValue {
            key: key.to_owned(),
            received: value.clone(),
            allowed: allowed.to_vec(),
        })),
        _ => Ok(()),
    }
}

/// Walk `tree` along `path`; absent when any segment is missing or a
/// non-object is reached early.
pub(crate) fn lookup_path<'v>(tree: &'v Value, path: &[&str]) -> Option<&'v Value> {
    path.iter()
        .try_fold(tree, |node, segment| node.as_object()?.get(*segment))
}
