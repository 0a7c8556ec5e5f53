//! Unit tests for schema classification and validation.

use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::{Branch, Computed, EnvVarParser, LeafDefinition, Schema, SchemaNode};
use crate::ConfigError;

fn constant(value: Value) -> Computed {
    Computed::new(Vec::<String>::new(), move |_| Ok(value.clone()))
}

#[fixture]
fn socket_document() -> Value {
    json!({
        "socket": {
            "protocol": { "default": "ws", "values": ["ws", "wss"], "envVar": "PROTOCOL" },
            "host": { "default": "localhost" },
            "port": { "default": 8081, "commandLineArg": "wsPort", "envVar": "PORT" },
            "tags": { "envVar": "TAGS", "envVarParser": "," }
        },
        "debug": {}
    })
}

#[rstest]
fn classifies_leaves_and_branches(socket_document: Value) {
    let schema = Schema::from_value(&socket_document).expect("valid schema");
    let paths: Vec<String> = schema.leaves().into_iter().map(|(path, _)| path).collect();
    assert_eq!(
        paths,
        ["socket.protocol", "socket.host", "socket.port", "socket.tags", "debug"]
    );
    assert!(matches!(schema.root().get("socket"), Some(SchemaNode::Branch(_))));
}

#[rstest]
fn empty_object_is_a_leaf_defaulting_to_empty_object(socket_document: Value) {
    let schema = Schema::from_value(&socket_document).expect("valid schema");
    let Some(SchemaNode::Leaf(leaf)) = schema.root().get("debug") else {
        panic!("expected `debug` to be a leaf");
    };
    assert_eq!(leaf.get_default(), &json!({}));
}

#[rstest]
fn delimiter_field_becomes_parser(socket_document: Value) {
    let schema = Schema::from_value(&socket_document).expect("valid schema");
    let tags = schema
        .leaves()
        .into_iter()
        .find_map(|(path, leaf)| (path == "socket.tags").then_some(leaf))
        .expect("tags leaf");
    assert!(matches!(
        tags.get_env_var_parser(),
        Some(EnvVarParser::Delimiter(d)) if d == ","
    ));
}

#[rstest]
#[case(json!([1, 2]), "")]
#[case(json!({ "default": 1 }), "")]
#[case(json!({ "server": 5 }), "server")]
#[case(json!({ "server": { "port": { "default": 1, "typ": "int" } } }), "server.port")]
#[case(json!({ "server": { "port": { "default": 1, "nested": {} } } }), "server.port")]
#[case(json!({ "server": { "port": {}, "flag": true } }), "server")]
#[case(json!({ "server": { "port": { "envVar": 7 } } }), "server.port")]
#[case(json!({ "server": { "port": { "values": "ws" } } }), "server.port")]
fn shape_errors_name_the_offending_path(#[case] document: Value, #[case] expected: &str) {
    let err = Schema::from_value(&document).expect_err("document must be rejected");
    assert!(
        matches!(&*err, ConfigError::SchemaShape { path, .. } if path == expected),
        "unexpected error {err:?}"
    );
}

#[rstest]
#[case(LeafDefinition::new().command_line_arg("deployConfig"))]
#[case(LeafDefinition::new().command_line_arg("dc"))]
#[case(LeafDefinition::new().command_line_arg("help"))]
#[case(LeafDefinition::new().command_line_arg("--"))]
#[case(LeafDefinition::new().env_var(""))]
#[case(LeafDefinition::new().env_var_parser(EnvVarParser::delimiter("")))]
#[case(LeafDefinition::new().values(Vec::<Value>::new()))]
fn rejects_unusable_leaves(#[case] leaf: LeafDefinition) {
    let err = Schema::new(Branch::new().leaf("field", leaf)).expect_err("leaf must be rejected");
    assert!(
        matches!(&*err, ConfigError::SchemaShape { path, .. } if path == "field"),
        "unexpected error {err:?}"
    );
}

#[rstest]
fn rejects_flags_that_collide_after_kebab_casing() {
    let root = Branch::new()
        .leaf("a", LeafDefinition::new().command_line_arg("wsPort"))
        .branch(
            "inner",
            Branch::new().leaf("b", LeafDefinition::new().command_line_arg("ws_port")),
        );
    let err = Schema::new(root).expect_err("duplicate flag must be rejected");
    assert!(matches!(
        &*err,
        ConfigError::SchemaShape { path, .. } if path == "inner.b"
    ));
}

#[rstest]
fn leaves_may_share_a_command_line_argument() {
    let root = Branch::new()
        .leaf("a", LeafDefinition::new().command_line_arg("port"))
        .branch(
            "inner",
            Branch::new().leaf("b", LeafDefinition::new().command_line_arg("port")),
        );
    assert!(Schema::new(root).is_ok());
}

#[rstest]
fn accepts_backward_and_ancestor_references() {
    let root = Branch::new()
        .leaf("host", LeafDefinition::new().default_value("localhost"))
        .branch(
            "socket",
            Branch::new()
                .leaf("port", LeafDefinition::new().default_value(8081))
                .computed("url", Computed::new(["host", "port"], |_| Ok(Value::Null)))
                .computed("label", Computed::new(["url"], |_| Ok(Value::Null))),
        );
    assert!(Schema::new(root).is_ok());
}

#[rstest]
#[case::later_sibling(
    Branch::new()
        .computed("url", Computed::new(["port"], |_| Ok(Value::Null)))
        .leaf("port", LeafDefinition::new().default_value(8081)),
    "url",
    "port"
)]
#[case::unknown_name(
    Branch::new().computed("url", Computed::new(["missing"], |_| Ok(Value::Null))),
    "url",
    "missing"
)]
#[case::ancestor_declared_after_branch(
    Branch::new()
        .branch("socket", Branch::new().computed("url", Computed::new(["host"], |_| Ok(Value::Null))))
        .leaf("host", LeafDefinition::new().default_value("localhost")),
    "socket.url",
    "host"
)]
#[case::ancestor_computed(
    Branch::new()
        .computed("base", constant(json!("x")))
        .branch("socket", Branch::new().computed("url", Computed::new(["base"], |_| Ok(Value::Null)))),
    "socket.url",
    "base"
)]
fn rejects_forward_references(
    #[case] root: Branch,
    #[case] expected_path: &str,
    #[case] expected_reference: &str,
) {
    let err = Schema::new(root).expect_err("forward reference must be rejected");
    assert!(
        matches!(
            &*err,
            ConfigError::ForwardReference { path, reference }
                if path == expected_path && reference == expected_reference
        ),
        "unexpected error {err:?}"
    );
}

#[rstest]
fn node_replaces_in_place() {
    let branch = Branch::new()
        .leaf("a", LeafDefinition::new().default_value(1))
        .leaf("b", LeafDefinition::new())
        .leaf("a", LeafDefinition::new().default_value(2));
    let names: Vec<&str> = branch.members().map(|(name, _)| name).collect();
    assert_eq!(names, ["a", "b"]);
    let Some(SchemaNode::Leaf(a)) = branch.get("a") else {
        panic!("expected leaf");
    };
    assert_eq!(a.get_default(), &json!(2));
}

#[rstest]
fn map_branch_attaches_computed_nodes(socket_document: Value) {
    let root = Branch::from_value(&socket_document)
        .expect("classifiable")
        .map_branch("socket", |socket| socket.computed("url", constant(json!("u"))));
    let Some(SchemaNode::Branch(socket)) = root.get("socket") else {
        panic!("expected socket branch");
    };
    assert!(matches!(socket.get("url"), Some(SchemaNode::Computed(_))));
    assert!(Schema::new(root).is_ok());
}
