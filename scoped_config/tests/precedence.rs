//! Precedence of command line, environment, deploy-config and defaults.
//!
//! Drives `resolve` with hand-built inputs so every source combination is
//! checked without touching the process environment.

mod common;

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use scoped_config::{CommandLineArgs, ConfigError, Environment, ValueSource, resolve};
use serde_json::{Value, json};

use common::socket_schema;

#[rstest]
#[case::only_default(None, None, None, json!(8081), ValueSource::Default)]
#[case::deploy_config(None, None, Some(7000), json!(7000), ValueSource::DeployConfig)]
#[case::env_over_deploy_config(None, Some("6000"), Some(7000), json!(6000), ValueSource::Environment)]
#[case::cli_over_everything(Some(5000), Some("6000"), Some(7000), json!(5000), ValueSource::CommandLine)]
#[case::cli_over_default(Some(5000), None, None, json!(5000), ValueSource::CommandLine)]
fn port_follows_precedence(
    #[case] cli: Option<u16>,
    #[case] env: Option<&str>,
    #[case] deploy: Option<u16>,
    #[case] expected: Value,
    #[case] expected_source: ValueSource,
) -> Result<()> {
    let schema = socket_schema();
    let command_line = cli.map_or_else(CommandLineArgs::new, |port| {
        CommandLineArgs::new().with_value("wsPort", port)
    });
    let environment = env.map_or_else(Environment::new, |port| {
        Environment::new().with_var("WS_PORT", port)
    });
    let tree = deploy.map_or_else(|| json!({}), |port| json!({ "socket": { "port": port } }));

    let resolved =
        resolve(&schema, &command_line, &environment, &tree).map_err(|e| anyhow!(e))?;
    ensure!(
        resolved.get("socket.port") == Some(&expected),
        "expected {expected}, got {:?}",
        resolved.get("socket.port")
    );
    ensure!(resolved.source_of("socket.port") == Some(expected_source));
    Ok(())
}

#[rstest]
fn empty_run_yields_defaults_everywhere() -> Result<()> {
    let resolved = resolve(
        &socket_schema(),
        &CommandLineArgs::new(),
        &Environment::new(),
        &json!({}),
    )
    .map_err(|e| anyhow!(e))?;
    ensure!(
        resolved.clone().into_value()
            == json!({
                "socket": {
                    "protocol": "ws",
                    "host": "localhost",
                    "port": 8081,
                    "fullUrl": "ws://localhost:8081"
                },
                "allowedOrigins": []
            }),
        "unexpected tree {:?}",
        resolved.as_map()
    );
    Ok(())
}

#[rstest]
fn deploy_config_fills_nested_paths_only() -> Result<()> {
    let tree = json!({
        "socket": { "host": "example.org", "unknown": true },
        "host": "ignored-at-root"
    });
    let resolved = resolve(
        &socket_schema(),
        &CommandLineArgs::new(),
        &Environment::new(),
        &tree,
    )
    .map_err(|e| anyhow!(e))?;
    ensure!(resolved.get("socket.host") == Some(&json!("example.org")));
    ensure!(resolved.get("socket.unknown").is_none());
    ensure!(resolved.get("host").is_none());
    Ok(())
}

#[rstest]
#[case::environment(CommandLineArgs::new(), Environment::new().with_var("PROTOCOL", "http"), json!({}))]
#[case::command_line(CommandLineArgs::new().with_value("protocol", "tcp"), Environment::new(), json!({}))]
#[case::deploy_config(CommandLineArgs::new(), Environment::new(), json!({ "socket": { "protocol": "udp" } }))]
fn values_outside_the_set_are_rejected(
    #[case] command_line: CommandLineArgs,
    #[case] environment: Environment,
    #[case] tree: Value,
) -> Result<()> {
    let err = resolve(&socket_schema(), &command_line, &environment, &tree)
        .err()
        .ok_or_else(|| anyhow!("expected resolution to fail"))?;
    ensure!(
        matches!(
            &*err,
            ConfigError::InvalidEnumValue { key, allowed, .. }
                if key == "socket.protocol" && allowed == &[json!("ws"), json!("wss")]
        ),
        "unexpected error {err}"
    );
    Ok(())
}

#[rstest]
fn allowed_value_is_accepted() -> Result<()> {
    let environment = Environment::new().with_var("PROTOCOL", "wss");
    let resolved = resolve(
        &socket_schema(),
        &CommandLineArgs::new(),
        &environment,
        &json!({}),
    )
    .map_err(|e| anyhow!(e))?;
    ensure!(resolved.get("socket.protocol") == Some(&json!("wss")));
    Ok(())
}

#[rstest]
fn identical_inputs_resolve_identically() -> Result<()> {
    let schema = socket_schema();
    let command_line = CommandLineArgs::new().with_value("wsPort", 9000);
    let environment = Environment::new()
        .with_var("PROTOCOL", "wss")
        .with_var("ALLOWED_ORIGINS", "a.example,b.example");
    let tree = json!({ "socket": { "host": "example.org" } });

    let first =
        resolve(&schema, &command_line, &environment, &tree).map_err(|e| anyhow!(e))?;
    let second =
        resolve(&schema, &command_line, &environment, &tree).map_err(|e| anyhow!(e))?;
    ensure!(first == second, "runs diverged: {first:?} vs {second:?}");
    ensure!(first.into_value() == second.into_value());
    Ok(())
}
