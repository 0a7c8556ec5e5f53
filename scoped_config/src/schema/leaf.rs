//! Leaf definitions and environment parsers.

use std::fmt;
use std::sync::Arc;

use serde_json::{Number, Value};

use crate::BoxError;

/// Signature of a user-supplied environment transform.
pub type TransformFn = dyn Fn(&str) -> Result<Value, BoxError> + Send + Sync;

/// How raw environment text is turned into a value.
#[derive(Clone)]
pub enum EnvVarParser {
    /// Pass the raw text to a transform and use its result.
    Transform(Arc<TransformFn>),
    /// Split the raw text on the delimiter into an ordered list of strings.
    Delimiter(String),
}

impl EnvVarParser {
    /// Wrap a transform closure.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoped_config::EnvVarParser;
    /// use serde_json::json;
    ///
    /// let upper = EnvVarParser::transform(|raw| Ok(json!(raw.to_uppercase())));
    /// assert_eq!(upper.parse("wss").ok(), Some(json!("WSS")));
    /// ```
    #[must_use]
    pub fn transform<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Self::Transform(Arc::new(f))
    }

    /// Split on `delimiter`.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoped_config::EnvVarParser;
    /// use serde_json::json;
    ///
    /// let csv = EnvVarParser::delimiter(",");
    /// assert_eq!(csv.parse("a,b,c").ok(), Some(json!(["a", "b", "c"])));
    /// ```
    #[must_use]
    pub fn delimiter(delimiter: impl Into<String>) -> Self {
        Self::Delimiter(delimiter.into())
    }

    /// Parse the text as a signed integer.
    #[must_use]
    pub fn integer() -> Self {
        Self::transform(|raw| {
            raw.trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(Into::into)
        })
    }

    /// Parse the text as a finite floating point number.
    #[must_use]
    pub fn number() -> Self {
        Self::transform(|raw| {
            let parsed: f64 = raw.trim().parse()?;
            Number::from_f64(parsed)
                .map(Value::Number)
                .ok_or_else(|| format!("`{raw}` is not a finite number").into())
        })
    }

    /// Parse common boolean spellings (`true`/`false`, `1`/`0`, `yes`/`no`,
    /// `on`/`off`), ignoring case.
    #[must_use]
    pub fn boolean() -> Self {
        Self::transform(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
            "false" | "0" | "no" | "off" => Ok(Value::Bool(false)),
            other => Err(format!("expected a boolean, found `{other}`").into()),
        })
    }

    /// Parse the text as a JSON document.
    #[must_use]
    pub fn json() -> Self {
        Self::transform(|raw| serde_json::from_str(raw).map_err(Into::into))
    }

    /// Apply the parser to `raw`.
    ///
    /// # Errors
    ///
    /// Returns the transform's error unchanged. Delimiter parsing never fails.
    pub fn parse(&self, raw: &str) -> Result<Value, BoxError> {
        match self {
            Self::Transform(transform) => transform(raw),
            Self::Delimiter(delimiter) => Ok(Value::Array(
                raw.split(delimiter.as_str())
                    .map(|part| Value::String(part.to_owned()))
                    .collect(),
            )),
        }
    }
}

impl fmt::Debug for EnvVarParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transform(_) => f.write_str("Transform(..)"),
            Self::Delimiter(delimiter) => f.debug_tuple("Delimiter").field(delimiter).finish(),
        }
    }
}

/// Definition of a single configurable property.
///
/// # Examples
///
/// ```
/// use scoped_config::{EnvVarParser, LeafDefinition};
///
/// let port = LeafDefinition::new()
///     .description("Port the socket server binds to")
///     .default_value(8081)
///     .command_line_arg("port")
///     .env_var("PORT")
///     .env_var_parser(EnvVarParser::integer());
/// assert_eq!(port.get_env_var(), Some("PORT"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LeafDefinition {
    description: Option<String>,
    default: Value,
    values: Option<Vec<Value>>,
    command_line_arg: Option<String>,
    env_var: Option<String>,
    env_var_parser: Option<EnvVarParser>,
}

impl LeafDefinition {
    /// Create a leaf with a `null` default and no sources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the human-readable description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the value used when no source supplies one.
    #[must_use]
    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    /// Restrict accepted values to the given ordered set.
    #[must_use]
    pub fn values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Read the value from the command-line map under `name`.
    #[must_use]
    pub fn command_line_arg(mut self, name: impl Into<String>) -> Self {
        self.command_line_arg = Some(name.into());
        self
    }

    /// Read the value from the environment variable `name`.
    #[must_use]
    pub fn env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = Some(name.into());
        self
    }

    /// Parse environment text with `parser`.
    #[must_use]
    pub fn env_var_parser(mut self, parser: EnvVarParser) -> Self {
        self.env_var_parser = Some(parser);
        self
    }

    /// Description, if any.
    #[must_use]
    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Default value (`null` when none was declared).
    #[must_use]
    pub const fn get_default(&self) -> &Value {
        &self.default
    }

    /// Allowed values, if restricted.
    #[must_use]
    pub fn get_values(&self) -> Option<&[Value]> {
        self.values.as_deref()
    }

    /// Command-line key, if any.
    #[must_use]
    pub fn get_command_line_arg(&self) -> Option<&str> {
        self.command_line_arg.as_deref()
    }

    /// Environment variable name, if any.
    #[must_use]
    pub fn get_env_var(&self) -> Option<&str> {
        self.env_var.as_deref()
    }

    /// Environment parser, if any.
    #[must_use]
    pub const fn get_env_var_parser(&self) -> Option<&EnvVarParser> {
        self.env_var_parser.as_ref()
    }
}
