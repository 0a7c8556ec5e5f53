//! Authoring checks run once when a [`super::Schema`] is built.

use std::collections::HashMap;
use std::sync::Arc;

use heck::ToKebabCase;

use crate::{ConfigError, ConfigResult};

use super::{Branch, EnvVarParser, LeafDefinition, SchemaNode, join_path};

/// Long flags owned by the command-line reader itself.
const RESERVED_FLAGS: [&str; 3] = ["deploy-config", "dc", "help"];

pub(super) fn validate(root: &Branch) -> ConfigResult<()> {
    let mut command_line_flags = HashMap::new();
    validate_branch(root, "", &[], &mut command_line_flags)
}

/// `outer` holds the names visible from ancestors: non-computed members
/// declared before the branch that leads here.
fn validate_branch<'s>(
    branch: &'s Branch,
    prefix: &str,
    outer: &[&'s str],
    command_line_flags: &mut HashMap<String, String>,
) -> ConfigResult<()> {
    let mut earlier: Vec<&str> = Vec::new();
    let mut earlier_plain: Vec<&str> = Vec::new();
    for (name, node) in branch.members() {
        let path = join_path(prefix, name);
        if name.is_empty() {
            return Err(ConfigError::schema_shape(path, "member names must not be empty"));
        }
        match node {
            SchemaNode::Leaf(leaf) => validate_leaf(leaf, &path, command_line_flags)?,
            SchemaNode::Branch(inner) => {
                let mut visible = outer.to_vec();
                visible.extend(earlier_plain.iter().copied());
                validate_branch(inner, &path, &visible, command_line_flags)?;
            }
            SchemaNode::Computed(computed) => {
                if let Some(reference) = computed
                    .requires()
                    .iter()
                    .find(|r| !earlier.contains(&r.as_str()) && !outer.contains(&r.as_str()))
                {
                    return Err(Arc::new(ConfigError::ForwardReference {
                        path,
                        reference: reference.clone(),
                    }));
                }
            }
        }
        earlier.push(name);
        if !matches!(node, SchemaNode::Computed(_)) {
            earlier_plain.push(name);
        }
    }
    Ok(())
}

fn validate_leaf(
    leaf: &LeafDefinition,
    path: &str,
    command_line_flags: &mut HashMap<String, String>,
) -> ConfigResult<()> {
    if let Some(arg) = leaf.get_command_line_arg() {
        let flag = arg.to_kebab_case();
        if flag.is_empty() {
            return Err(ConfigError::schema_shape(
                path,
                "`commandLineArg` must contain at least one letter or digit",
            ));
        }
        if RESERVED_FLAGS.contains(&flag.as_str()) {
            return Err(ConfigError::schema_shape(
                path,
                format!("command-line argument `{arg}` collides with the reserved `--{flag}` flag"),
            ));
        }
        // Leaves may share one argument; distinct arguments may not share a flag.
        match command_line_flags.get(&flag) {
            Some(existing) if existing != arg => {
                return Err(ConfigError::schema_shape(
                    path,
                    format!("command-line argument `{arg}` maps to `--{flag}`, already used by `{existing}`"),
                ));
            }
            Some(_) => {}
            None => {
                command_line_flags.insert(flag, arg.to_owned());
            }
        }
    }
    if leaf.get_env_var().is_some_and(str::is_empty) {
        return Err(ConfigError::schema_shape(path, "`envVar` must not be empty"));
    }
    if let Some(EnvVarParser::Delimiter(delimiter)) = leaf.get_env_var_parser()
        && delimiter.is_empty()
    {
        return Err(ConfigError::schema_shape(path, "`envVarParser` delimiter must not be empty"));
    }
    if leaf.get_values().is_some_and(<[_]>::is_empty) {
        return Err(ConfigError::schema_shape(path, "`values` must list at least one value"));
    }
    Ok(())
}
