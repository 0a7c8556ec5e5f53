//! Primary error enum for schema resolution flows.

use figment::Error as FigmentError;
use serde_json::Value;
use thiserror::Error;

use crate::DeployConfigOrigin;

use super::helpers::render_allowed;

/// Boxed error returned by user-supplied environment parsers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while resolving configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A value supplied by a source is not one of the declared `values`.
    #[error(
        "Invalid value for '{key}': received {received}, expected one of {}",
        render_allowed(.allowed)
    )]
    InvalidEnumValue {
        /// Dotted path of the offending property.
        key: String,
        /// Value obtained from the winning source.
        received: Value,
        /// Allowed values declared by the schema.
        allowed: Vec<Value>,
    },

    /// A custom environment parser rejected the raw variable text.
    #[error("Failed to parse environment variable '{var}' for '{key}': {source}")]
    MalformedEnvValue {
        /// Dotted path of the property being resolved.
        key: String,
        /// Name of the environment variable that held the raw text.
        var: String,
        /// Error raised by the parser.
        #[source]
        source: BoxError,
    },

    /// A schema node could not be classified or carries conflicting fields.
    #[error("Invalid schema at '{path}': {message}")]
    SchemaShape {
        /// Dotted path of the malformed node (empty for the root).
        path: String,
        /// Human-readable description of the defect.
        message: String,
    },

    /// A computed node depends on a property declared after it.
    #[error("Computed property '{path}' references '{reference}' before it is resolved")]
    ForwardReference {
        /// Dotted path of the computed node.
        path: String,
        /// Name the node declared as a dependency.
        reference: String,
    },

    /// A computed transform looked up a name that is not in scope.
    #[error("Computed property '{path}' read unresolved property '{reference}'")]
    UnresolvedReference {
        /// Dotted path of the computed node.
        path: String,
        /// Name that could not be found in the scope.
        reference: String,
    },

    /// The located deploy-config path is not a string.
    #[error("Deploy-config path from {origin} must be a string, received {received}")]
    DeployConfigPath {
        /// Source that supplied the value.
        origin: DeployConfigOrigin,
        /// Value that was supplied.
        received: Value,
    },

    /// Error parsing command-line arguments.
    #[error("Failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// Error originating from a deploy-config file or manifest.
    #[error("Configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: std::path::PathBuf,
        /// Underlying error reported by the reader.
        #[source]
        source: BoxError,
    },

    /// Error while gathering values through figment providers.
    #[error("Failed to gather configuration: {0}")]
    Gathering(#[from] Box<FigmentError>),

    /// The resolved tree could not be converted into the requested type.
    #[error("Failed to deserialise resolved configuration: {source}")]
    Deserialize {
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}
