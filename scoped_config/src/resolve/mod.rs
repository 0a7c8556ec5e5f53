//! Resolution engine.
//!
//! [`resolve()`] walks a [`Schema`] against the four raw inputs and returns a
//! [`ResolvedConfig`]. It performs no I/O and holds no state between calls.
//! [`locate_deploy_config`] picks the deploy-config path with the same
//! precedence rules a leaf uses.

mod locate;
mod provenance;
mod resolved;
mod scope;
mod value;
mod walk;

pub use locate::{DeployConfigLocation, DeployConfigOrigin, locate_deploy_config};
pub use provenance::ValueSource;
pub use resolved::ResolvedConfig;
pub use scope::Scope;

use serde_json::Value;

use crate::ConfigResult;
use crate::schema::Schema;
use crate::sources::{CommandLineArgs, Environment};

use value::LeafInputs;
use walk::Walker;

/// Resolve `schema` against the command line, environment and deploy-config.
///
/// Each leaf takes the first value found in: the command-line map under its
/// `commandLineArg`, the environment under its `envVar` (parsed by its
/// `envVarParser`), the deploy-config tree at its nested path, and finally
/// its default. Computed members are evaluated after the plain members of
/// their branch. The first error aborts resolution.
///
/// # Errors
///
/// Returns [`crate::ConfigError::InvalidEnumValue`] when a supplied value is
/// outside the declared `values`, [`crate::ConfigError::MalformedEnvValue`]
/// when an environment parser fails, and any error raised by a computed
/// transform.
///
/// # Examples
///
/// ```
/// use scoped_config::{
///     Branch, CommandLineArgs, Environment, LeafDefinition, Schema, resolve,
/// };
/// use serde_json::json;
///
/// let schema = Schema::new(Branch::new().leaf(
///     "protocol",
///     LeafDefinition::new()
///         .default_value("ws")
///         .values(["ws", "wss"])
///         .env_var("PROTOCOL"),
/// ))?;
/// let env = Environment::new().with_var("PROTOCOL", "wss");
/// let resolved = resolve(&schema, &CommandLineArgs::new(), &env, &json!({}))?;
/// assert_eq!(resolved.into_value(), json!({ "protocol": "wss" }));
/// # Ok::<_, std::sync::Arc<scoped_config::ConfigError>>(())
/// ```
pub fn resolve(
    schema: &Schema,
    command_line: &CommandLineArgs,
    environment: &Environment,
    deploy_config: &Value,
) -> ConfigResult<ResolvedConfig> {
    let mut walker = Walker::new(LeafInputs {
        cli: command_line,
        env: environment,
        tree: deploy_config,
    });
    let mut path = Vec::new();
    let tree = walker.walk_branch(schema.root(), &mut path, None)?;
    Ok(ResolvedConfig::new(tree, walker.into_provenance()))
}
