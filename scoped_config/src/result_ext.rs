//! Extensions for mapping errors to `ConfigResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(e.into()))`
//! patterns when converting external error types into the crate's
//! `ConfigResult<T>` alias (`Result<T, Arc<ConfigError>>`).
//!
//! # Examples
//!
//! ```
//! use scoped_config::{ConfigResult, ConfigResultExt};
//!
//! fn parse() -> ConfigResult<serde_json::Value> {
//!     serde_json::from_str("{\"port\": 8081}").into_config()
//! }
//! # assert!(parse().is_ok());
//! ```

use crate::{ConfigError, ConfigResult};
use std::sync::Arc;

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<ConfigError>` into a `ConfigResult<T>`.
pub trait ConfigResultExt<T, E> {
    /// Convert `Result<T, E>` into `ConfigResult<T>` using `Into<ConfigError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<ConfigError>`.
    fn into_config(self) -> ConfigResult<T>;
}

impl<T, E> ConfigResultExt<T, E> for Result<T, E>
where
    E: Into<ConfigError>,
{
    fn into_config(self) -> ConfigResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
