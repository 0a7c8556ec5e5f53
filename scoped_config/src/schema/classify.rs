//! Structural classification of JSON schema documents.
//!
//! An object carrying any leaf-definition key is a leaf. An object without
//! leaf keys whose members are all objects is a branch. An empty object is a
//! leaf whose default is an empty object. Everything else is rejected.

use serde_json::{Map, Value};

use crate::{ConfigError, ConfigResult};

use super::{Branch, EnvVarParser, LeafDefinition, SchemaNode, join_path};

const LEAF_KEYS: [&str; 6] = [
    "description",
    "default",
    "values",
    "commandLineArg",
    "envVar",
    "envVarParser",
];

pub(super) fn classify_root(value: &Value) -> ConfigResult<Branch> {
    let Value::Object(map) = value else {
        return Err(ConfigError::schema_shape(
            "",
            format!("schema root must be an object, found {}", kind(value)),
        ));
    };
    if has_leaf_keys(map) {
        return Err(ConfigError::schema_shape(
            "",
            "schema root must be a namespace, not a leaf definition",
        ));
    }
    classify_members(map, "")
}

fn classify_members(map: &Map<String, Value>, prefix: &str) -> ConfigResult<Branch> {
    map.iter().try_fold(Branch::new(), |branch, (name, child)| {
        let node = classify_node(child, &join_path(prefix, name))?;
        Ok(branch.node(name.as_str(), node))
    })
}

fn classify_node(value: &Value, path: &str) -> ConfigResult<SchemaNode> {
    let Value::Object(map) = value else {
        return Err(ConfigError::schema_shape(
            path,
            format!("expected an object, found {}", kind(value)),
        ));
    };
    if has_leaf_keys(map) {
        return leaf_from_map(map, path).map(SchemaNode::Leaf);
    }
    if map.is_empty() {
        return Ok(SchemaNode::Leaf(
            LeafDefinition::new().default_value(Value::Object(Map::new())),
        ));
    }
    if map.values().all(Value::is_object) {
        return classify_members(map, path).map(SchemaNode::Branch);
    }
    Err(ConfigError::schema_shape(
        path,
        "object mixes nested properties with unrecognised fields",
    ))
}

fn has_leaf_keys(map: &Map<String, Value>) -> bool {
    map.keys().any(|key| LEAF_KEYS.contains(&key.as_str()))
}

fn leaf_from_map(map: &Map<String, Value>, path: &str) -> ConfigResult<LeafDefinition> {
    map.iter().try_fold(LeafDefinition::new(), |leaf, (key, value)| {
        Ok(match key.as_str() {
            "description" => leaf.description(expect_str(value, path, key)?),
            "default" => leaf.default_value(value.clone()),
            "values" => leaf.values(expect_array(value, path, key)?.iter().cloned()),
            "commandLineArg" => leaf.command_line_arg(expect_str(value, path, key)?),
            "envVar" => leaf.env_var(expect_str(value, path, key)?),
            "envVarParser" => {
                leaf.env_var_parser(EnvVarParser::delimiter(expect_str(value, path, key)?))
            }
            other if value.is_object() => {
                return Err(ConfigError::schema_shape(
                    path,
                    format!("nested property `{other}` conflicts with leaf definition fields"),
                ));
            }
            other => {
                return Err(ConfigError::schema_shape(
                    path,
                    format!("unknown leaf field `{other}`"),
                ));
            }
        })
    })
}

fn expect_str<'v>(value: &'v Value, path: &str, key: &str) -> ConfigResult<&'v str> {
    value.as_str().ok_or_else(|| {
        ConfigError::schema_shape(
            path,
            format!("`{key}` must be a string, found {}", kind(value)),
        )
    })
}

fn expect_array<'v>(value: &'v Value, path: &str, key: &str) -> ConfigResult<&'v Vec<Value>> {
    value.as_array().ok_or_else(|| {
        ConfigError::schema_shape(
            path,
            format!("`{key}` must be an array, found {}", kind(value)),
        )
    })
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
