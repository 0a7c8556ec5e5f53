//! Constructors for `ConfigError` values shared across modules.

use std::path::Path;
use std::sync::Arc;

use figment::Error as FigmentError;

use super::{BoxError, ConfigError};

impl ConfigError {
    /// Construct a schema shape error for the node at `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoped_config::ConfigError;
    /// let e = ConfigError::schema_shape("server.port", "unknown field `typ`");
    /// assert!(matches!(&*e, ConfigError::SchemaShape { .. }));
    /// ```
    #[must_use]
    pub fn schema_shape(path: impl Into<String>, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::SchemaShape {
            path: path.into(),
            message: message.into(),
        })
    }

    /// Construct a file error for `path`.
    #[must_use]
    pub fn file(path: &Path, source: impl Into<BoxError>) -> Arc<Self> {
        Arc::new(Self::File {
            path: path.to_path_buf(),
            source: source.into(),
        })
    }

    /// Construct a gathering error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use scoped_config::ConfigError;
    /// let e = ConfigError::gathering(figment::Error::from("boom"));
    /// assert!(matches!(&*e, ConfigError::Gathering(_)));
    /// ```
    #[must_use]
    pub fn gathering(source: FigmentError) -> Arc<Self> {
        Arc::new(Self::Gathering(Box::new(source)))
    }
}

pub(crate) fn file_not_found(path: &Path, msg: impl Into<String>) -> Arc<ConfigError> {
    ConfigError::file(
        path,
        std::io::Error::new(std::io::ErrorKind::NotFound, msg.into()),
    )
}

pub(crate) fn file_invalid_data(path: &Path, msg: impl Into<String>) -> Arc<ConfigError> {
    ConfigError::file(
        path,
        std::io::Error::new(std::io::ErrorKind::InvalidData, msg.into()),
    )
}
