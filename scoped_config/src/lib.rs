//! Schema-driven configuration resolution.
//!
//! A [`Schema`] describes a tree of settings. Each leaf may be supplied on
//! the command line, through an environment variable, or by a deploy-config
//! file, and falls back to its default. [`resolve()`] applies that precedence
//! to every leaf, enforces `values` sets, and evaluates [`Computed`]
//! properties against the values resolved before them.
//!
//! [`resolve()`] is pure: callers hand it already materialised inputs.
//! [`ConfigLoader`] reads those inputs from the process for applications
//! that want the whole pipeline.
//!
//! ```rust
//! use scoped_config::{
//!     Branch, CommandLineArgs, Computed, Environment, Schema, ValueSource, resolve,
//! };
//! use serde_json::json;
//!
//! let socket = Branch::from_value(&json!({
//!     "socket": {
//!         "protocol": { "default": "ws", "values": ["ws", "wss"], "envVar": "PROTOCOL" },
//!         "port": { "default": 8081, "commandLineArg": "wsPort" }
//!     }
//! }))?;
//! let schema = Schema::new(socket.map_branch("socket", |socket| {
//!     socket.computed(
//!         "url",
//!         Computed::new(["protocol", "port"], |scope| {
//!             Ok(json!(format!(
//!                 "{}://localhost:{}",
//!                 scope.require_as::<String>("protocol")?,
//!                 scope.require_as::<u16>("port")?
//!             )))
//!         }),
//!     )
//! }))?;
//!
//! let cli = CommandLineArgs::new().with_value("wsPort", 9000);
//! let env = Environment::new().with_var("PROTOCOL", "wss");
//! let resolved = resolve(&schema, &cli, &env, &json!({}))?;
//! assert_eq!(resolved.get("socket.url"), Some(&json!("wss://localhost:9000")));
//! assert_eq!(resolved.source_of("socket.port"), Some(ValueSource::CommandLine));
//! # Ok::<_, std::sync::Arc<scoped_config::ConfigError>>(())
//! ```

use std::sync::Arc;

mod error;
mod loader;
mod resolve;
mod result_ext;
mod schema;
mod sources;
#[cfg(test)]
mod test_support;

pub use error::{BoxError, ConfigError, is_display_request};
pub use loader::ConfigLoader;
pub use resolve::{
    DeployConfigLocation, DeployConfigOrigin, ResolvedConfig, Scope, ValueSource,
    locate_deploy_config, resolve,
};
pub use result_ext::ConfigResultExt;
pub use schema::{
    Branch, ComputeFn, Computed, EnvVarParser, LeafDefinition, Schema, SchemaNode, TransformFn,
};
pub use sources::{
    CommandLineArgs, DEPLOY_CONFIG_ARG, DEPLOY_CONFIG_ENV, DEPLOY_CONFIG_FIELD, Environment,
    MANIFEST_FILE, Manifest, build_command, load_deploy_config, parse_args,
};

/// Result type used throughout the crate.
///
/// Errors are shared behind an [`Arc`] so they can be cloned cheaply.
pub type ConfigResult<T> = Result<T, Arc<ConfigError>>;
