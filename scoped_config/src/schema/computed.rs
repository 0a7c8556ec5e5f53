//! Computed (derived) schema nodes.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::{ConfigResult, Scope};

/// Signature of a computed property transform.
pub type ComputeFn = dyn Fn(&Scope<'_>) -> ConfigResult<Value> + Send + Sync;

/// A property whose value is derived from properties resolved before it.
///
/// `requires` lists the names the transform reads. Each must be declared
/// earlier in the same branch, or before the enclosing branch in an
/// ancestor; [`crate::Schema::new`] rejects anything else.
///
/// # Examples
///
/// ```
/// use scoped_config::Computed;
/// use serde_json::json;
///
/// let full_url = Computed::new(["protocol", "host", "port"], |scope| {
///     let protocol = scope.require("protocol")?;
///     let host = scope.require("host")?;
///     let port = scope.require("port")?;
///     Ok(json!(format!(
///         "{}://{}:{}",
///         protocol.as_str().unwrap_or_default(),
///         host.as_str().unwrap_or_default(),
///         port
///     )))
/// });
/// assert_eq!(full_url.requires().len(), 3);
/// ```
#[derive(Clone)]
pub struct Computed {
    requires: Vec<String>,
    transform: Arc<ComputeFn>,
}

impl Computed {
    /// Create a computed node reading `requires`.
    #[must_use]
    pub fn new<I, S, F>(requires: I, transform: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Scope<'_>) -> ConfigResult<Value> + Send + Sync + 'static,
    {
        Self {
            requires: requires.into_iter().map(Into::into).collect(),
            transform: Arc::new(transform),
        }
    }

    /// Names this node declared as dependencies.
    #[must_use]
    pub fn requires(&self) -> &[String] {
        &self.requires
    }

    pub(crate) fn evaluate(&self, scope: &Scope<'_>) -> ConfigResult<Value> {
        (self.transform)(scope)
    }
}

impl fmt::Debug for Computed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Computed")
            .field("requires", &self.requires)
            .finish_non_exhaustive()
    }
}
