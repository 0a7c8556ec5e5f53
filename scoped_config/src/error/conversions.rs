//! Trait-based conversions between external error types and `ConfigError`.

use figment::Error as FigmentError;

use super::ConfigError;

impl From<clap::Error> for ConfigError {
    fn from(e: clap::Error) -> Self {
        Self::CliParsing(Box::new(e))
    }
}

impl From<FigmentError> for ConfigError {
    fn from(e: FigmentError) -> Self {
        Self::Gathering(Box::new(e))
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(source: serde_json::Error) -> Self {
        Self::Deserialize { source }
    }
}
