//! Helpers for classifying and rendering errors.

use clap::{Error as ClapError, error::ErrorKind};
use serde_json::Value;

use super::ConfigError;

/// Returns `true` when a [`clap::Error`] corresponds to `--help` or
/// `--version`.
///
/// Entry points can delegate to [`clap::Error::exit`] for these and keep the
/// zero exit status.
#[must_use]
pub fn is_display_request(err: &ClapError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

impl ConfigError {
    /// Returns the wrapped [`clap::Error`] when this error is a help or
    /// version request rather than a real parse failure.
    #[must_use]
    pub fn as_display_request(&self) -> Option<&ClapError> {
        match self {
            Self::CliParsing(err) if is_display_request(err) => Some(err),
            _ => None,
        }
    }
}

pub(super) fn render_allowed(allowed: &[Value]) -> String {
    let items: Vec<String> = allowed.iter().map(Value::to_string).collect();
    format!("[{}]", items.join(", "))
}
