//! Error types produced by schema resolution and the source readers.

mod constructors;
mod conversions;
mod helpers;
mod types;

pub use helpers::is_display_request;
pub use types::{BoxError, ConfigError};

pub(crate) use constructors::{file_invalid_data, file_not_found};
