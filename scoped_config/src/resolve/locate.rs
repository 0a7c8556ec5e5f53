//! Deploy-config location chain.

use std::fmt;
use std::sync::Arc;

use camino::Utf8PathBuf;
use serde_json::Value;

use crate::schema::LeafDefinition;
use crate::sources::{
    CommandLineArgs, DEPLOY_CONFIG_ARG, DEPLOY_CONFIG_ENV, DEPLOY_CONFIG_FIELD, Environment,
    Manifest,
};
use crate::{ConfigError, ConfigResult};

use super::ValueSource;
use super::value::{LeafInputs, resolve_leaf};

/// Where the deploy-config path came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeployConfigOrigin {
    /// `--deploy-config` / `--dc`.
    CommandLine,
    /// The `SC_DEPLOY_CONFIG` environment variable.
    Environment,
    /// The manifest's `deployConfig` field.
    Manifest,
}

impl fmt::Display for DeployConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CommandLine => "command line",
            Self::Environment => "environment",
            Self::Manifest => "manifest",
        })
    }
}

/// A located deploy-config file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeployConfigLocation {
    /// Path to the file. Manifest-relative paths are joined onto the
    /// manifest's directory.
    pub path: Utf8PathBuf,
    /// Source of the path.
    pub origin: DeployConfigOrigin,
}

/// Pick the deploy-config path: command line, then environment, then the
/// manifest, else none.
///
/// The chain is resolved as a leaf with `commandLineArg = "deployConfig"`
/// and `envVar = "SC_DEPLOY_CONFIG"` whose tree source is the manifest. An
/// empty or `null` value counts as absent.
///
/// # Errors
///
/// Returns [`ConfigError::DeployConfigPath`] when the winning value is not
/// a string.
///
/// # Examples
///
/// ```
/// use scoped_config::{CommandLineArgs, DeployConfigOrigin, Environment, Manifest, locate_deploy_config};
///
/// let cli = CommandLineArgs::new().with_value("deployConfig", "a.json");
/// let env = Environment::new().with_var("SC_DEPLOY_CONFIG", "b.json");
/// let located = locate_deploy_config(&cli, &env, &Manifest::default())?;
/// let located = located.expect("flag supplies a path");
/// assert_eq!(located.path, "a.json");
/// assert_eq!(located.origin, DeployConfigOrigin::CommandLine);
/// # Ok::<_, std::sync::Arc<scoped_config::ConfigError>>(())
/// ```
pub fn locate_deploy_config(
    command_line: &CommandLineArgs,
    environment: &Environment,
    manifest: &Manifest,
) -> ConfigResult<Option<DeployConfigLocation>> {
    let chain = LeafDefinition::new()
        .command_line_arg(DEPLOY_CONFIG_ARG)
        .env_var(DEPLOY_CONFIG_ENV);
    let inputs = LeafInputs {
        cli: command_line,
        env: environment,
        tree: manifest.as_value(),
    };
    let (value, source) = resolve_leaf(&chain, &[DEPLOY_CONFIG_FIELD], inputs)?;
    let origin = match source {
        ValueSource::CommandLine => DeployConfigOrigin::CommandLine,
        ValueSource::Environment => DeployConfigOrigin::Environment,
        ValueSource::DeployConfig => DeployConfigOrigin::Manifest,
        _ => return Ok(None),
    };
    let raw = match value {
        Value::String(raw) if raw.is_empty() => return Ok(None),
        Value::String(raw) => raw,
        Value::Null => return Ok(None),
        other => {
            return Err(Arc::new(ConfigError::DeployConfigPath {
                origin,
                received: other,
            }));
        }
    };
    let located = Utf8PathBuf::from(raw);
    let path = match manifest.dir() {
        Some(dir) if origin == DeployConfigOrigin::Manifest && located.is_relative() => {
            dir.join(located)
        }
        _ => located,
    };
    Ok(Some(DeployConfigLocation { path, origin }))
}
