//! Provenance of resolved values.

use std::fmt;

/// The source that supplied a resolved value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ValueSource {
    /// Value supplied on the command line.
    CommandLine,
    /// Value read from an environment variable.
    Environment,
    /// Value taken from the deploy-config tree.
    DeployConfig,
    /// The schema default.
    Default,
    /// Value returned by a computed property.
    Computed,
}

impl ValueSource {
    /// Whether the value came from outside the schema.
    #[must_use]
    pub const fn is_external(self) -> bool {
        matches!(
            self,
            Self::CommandLine | Self::Environment | Self::DeployConfig
        )
    }
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CommandLine => "command line",
            Self::Environment => "environment",
            Self::DeployConfig => "deploy-config",
            Self::Default => "default",
            Self::Computed => "computed",
        })
    }
}
