//! End-to-end loading: read every source, then resolve.

use std::ffi::OsString;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Command;
use serde_json::{Map, Value};

use crate::ConfigResult;
use crate::resolve::{ResolvedConfig, locate_deploy_config, resolve};
use crate::schema::Schema;
use crate::sources::{Environment, Manifest, load_deploy_config, parse_args};

/// Reads the command line, environment, manifest and deploy-config for a
/// schema and resolves them.
///
/// Anything not set on the builder is taken from the process: `argv` from
/// [`std::env::args_os`], the environment from [`Environment::from_process`]
/// and the manifest from `package.json` in the working directory.
///
/// # Examples
///
/// ```
/// use scoped_config::{Branch, ConfigLoader, Environment, LeafDefinition, Schema};
///
/// let schema = Schema::new(Branch::new().leaf(
///     "port",
///     LeafDefinition::new()
///         .default_value(8081)
///         .command_line_arg("wsPort")
///         .env_var("WS_PORT"),
/// ))?;
/// let resolved = ConfigLoader::new(&schema)
///     .args(["socket-server", "--ws-port", "9000"])
///     .environment(Environment::new().with_var("WS_PORT", "7000"))
///     .manifest_path("does-not-exist/package.json")
///     .load()?;
/// assert_eq!(resolved.get("port"), Some(&serde_json::json!(9000)));
/// # Ok::<_, std::sync::Arc<scoped_config::ConfigError>>(())
/// ```
#[derive(Debug)]
pub struct ConfigLoader<'s> {
    schema: &'s Schema,
    command: Option<Command>,
    args: Option<Vec<OsString>>,
    environment: Option<Environment>,
    manifest_path: Option<Utf8PathBuf>,
}

impl<'s> ConfigLoader<'s> {
    /// Start a loader for `schema`.
    #[must_use]
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            command: None,
            args: None,
            environment: None,
            manifest_path: None,
        }
    }

    /// Base command the schema's flags are added to.
    #[must_use]
    pub fn command(mut self, command: Command) -> Self {
        self.command = Some(command);
        self
    }

    /// Parse `args` (including the program name) instead of the process
    /// arguments.
    #[must_use]
    pub fn args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Use `environment` instead of the process environment.
    #[must_use]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Read the manifest from `path` instead of `./package.json`.
    #[must_use]
    pub fn manifest_path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.manifest_path = Some(path.into());
        self
    }

    /// Read all sources and resolve the schema.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::CliParsing`] when the arguments are
    /// rejected (including help requests), [`crate::ConfigError::File`] when
    /// the manifest or the located deploy-config cannot be read, and any
    /// error raised by [`resolve()`].
    pub fn load(self) -> ConfigResult<ResolvedConfig> {
        let command = self
            .command
            .unwrap_or_else(|| Command::new(env!("CARGO_PKG_NAME")));
        let args = self
            .args
            .unwrap_or_else(|| std::env::args_os().collect());
        let command_line = parse_args(self.schema, command, args)?;
        let environment = self.environment.unwrap_or_else(Environment::from_process);
        let manifest = match self.manifest_path {
            Some(path) => Manifest::read(&path)?.unwrap_or_default(),
            None => Manifest::discover(Utf8Path::new("."))?,
        };

        let deploy_config = match locate_deploy_config(&command_line, &environment, &manifest)? {
            Some(location) => {
                tracing::debug!(
                    path = %location.path,
                    origin = %location.origin,
                    "located deploy-config"
                );
                load_deploy_config(&location.path)?
            }
            None => {
                tracing::debug!("no deploy-config located");
                Value::Object(Map::new())
            }
        };

        resolve(self.schema, &command_line, &environment, &deploy_config)
    }
}
