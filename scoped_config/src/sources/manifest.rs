//! Package manifest lookup.
//!
//! The manifest is a JSON document beside the application. Only its
//! `deployConfig` field is consulted, as the last link of the deploy-config
//! location chain.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;

use crate::error::file_invalid_data;
use crate::{ConfigError, ConfigResult};

/// File name searched for by [`Manifest::discover`].
pub const MANIFEST_FILE: &str = "package.json";

/// A parsed manifest and the directory it was read from.
///
/// The default manifest is an empty object with no directory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Manifest {
    dir: Option<Utf8PathBuf>,
    value: Value,
}

impl Manifest {
    /// Wrap an already parsed manifest.
    ///
    /// Relative deploy-config paths are joined onto `dir` when one is given.
    #[must_use]
    pub fn from_value(dir: Option<Utf8PathBuf>, value: Value) -> Self {
        Self { dir, value }
    }

    /// Read the manifest at `path`, returning `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::File`] when the file cannot be read, is not
    /// valid JSON, or does not hold an object.
    pub fn read(path: &Utf8Path) -> ConfigResult<Option<Self>> {
        if !path.is_file() {
            tracing::trace!(path = %path, "no manifest");
            return Ok(None);
        }
        let data = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::file(path.as_std_path(), e))?;
        let value: Value = serde_json::from_str(&data)
            .map_err(|e| ConfigError::file(path.as_std_path(), e))?;
        if !value.is_object() {
            return Err(file_invalid_data(
                path.as_std_path(),
                "manifest must contain an object at the top level",
            ));
        }
        tracing::trace!(path = %path, "read manifest");
        let dir = path.parent().map(Utf8Path::to_path_buf);
        Ok(Some(Self::from_value(dir, value)))
    }

    /// Read [`MANIFEST_FILE`] from `dir`, falling back to an empty manifest.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Manifest::read`].
    pub fn discover(dir: &Utf8Path) -> ConfigResult<Self> {
        Ok(Self::read(&dir.join(MANIFEST_FILE))?.unwrap_or_default())
    }

    /// The parsed document.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Directory the manifest was read from.
    #[must_use]
    pub fn dir(&self) -> Option<&Utf8Path> {
        self.dir.as_deref()
    }
}
