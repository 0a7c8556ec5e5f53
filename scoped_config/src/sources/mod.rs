//! Readers that materialise the raw inputs consumed by [`crate::resolve()`].
//!
//! None of these are called by the engine itself; [`crate::ConfigLoader`]
//! wires them together for applications that want the whole pipeline.

mod cli;
mod deploy;
mod env;
mod manifest;

pub use cli::{CommandLineArgs, build_command, parse_args};
pub use deploy::load_deploy_config;
pub use env::Environment;
pub use manifest::{MANIFEST_FILE, Manifest};

/// Command-line key holding the deploy-config path.
pub const DEPLOY_CONFIG_ARG: &str = "deployConfig";

/// Environment variable holding the deploy-config path.
pub const DEPLOY_CONFIG_ENV: &str = "SC_DEPLOY_CONFIG";

/// Manifest field holding the deploy-config path.
pub const DEPLOY_CONFIG_FIELD: &str = "deployConfig";
