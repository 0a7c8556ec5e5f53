//! Shared fixtures for integration tests.
//!
//! Provides the socket-server schema used across suites and a helper that
//! runs a closure inside a `figment::Jail` with `anyhow` errors.

use anyhow::{Result, anyhow};
use scoped_config::{Branch, Computed, EnvVarParser, LeafDefinition, Schema};
use serde_json::json;

/// Socket-server schema: `protocol`, `host`, `port` and a computed `fullUrl`
/// under `socket`, plus a comma-separated `allowedOrigins` list.
pub fn socket_schema() -> Schema {
    let socket = Branch::new()
        .leaf(
            "protocol",
            LeafDefinition::new()
                .description("Socket protocol")
                .default_value("ws")
                .values(["ws", "wss"])
                .command_line_arg("protocol")
                .env_var("PROTOCOL"),
        )
        .leaf(
            "host",
            LeafDefinition::new()
                .default_value("localhost")
                .command_line_arg("wsHost")
                .env_var("WS_HOST"),
        )
        .leaf(
            "port",
            LeafDefinition::new()
                .default_value(8081)
                .command_line_arg("wsPort")
                .env_var("WS_PORT")
                .env_var_parser(EnvVarParser::integer()),
        )
        .computed(
            "fullUrl",
            Computed::new(["protocol", "host", "port"], |scope| {
                Ok(json!(format!(
                    "{}://{}:{}",
                    scope.require_as::<String>("protocol")?,
                    scope.require_as::<String>("host")?,
                    scope.require_as::<u16>("port")?
                )))
            }),
        );
    let root = Branch::new().branch("socket", socket).leaf(
        "allowedOrigins",
        LeafDefinition::new()
            .default_value(json!([]))
            .env_var("ALLOWED_ORIGINS")
            .env_var_parser(EnvVarParser::delimiter(",")),
    );
    Schema::new(root).unwrap_or_else(|err| panic!("socket schema must validate: {err}"))
}

/// Run `f` inside a `figment::Jail`, mapping errors through `anyhow`.
pub fn with_jail<F>(f: F) -> Result<()>
where
    F: FnOnce(&mut figment::Jail) -> Result<()>,
{
    figment::Jail::try_with(|j| f(j).map_err(|err| figment::Error::from(err.to_string())))
        .map_err(|err| anyhow!(err))
}
