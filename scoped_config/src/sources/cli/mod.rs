//! Command-line reader built on `clap`.
//!
//! Every leaf with a `commandLineArg` becomes a long flag named after the
//! kebab-cased argument, so `commandLineArg: "wsPort"` is set with
//! `--ws-port 9000`. The value parser follows the leaf's default (or its
//! first allowed value when the default is `null`): booleans accept an
//! optional `true`/`false`, integers and floats are parsed numerically,
//! arrays collect repeated flags, anything else is text. Only values that
//! were actually typed on the command line enter the map.

use std::collections::HashSet;
use std::ffi::OsString;

use clap::parser::ValueSource as ClapSource;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use heck::ToKebabCase;
use serde_json::{Map, Number, Value};

use crate::schema::{LeafDefinition, Schema};
use crate::{ConfigResult, ConfigResultExt};

use super::DEPLOY_CONFIG_ARG;

/// Flat map of command-line values keyed by `commandLineArg` name.
///
/// Values are already typed; the resolver uses them unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommandLineArgs {
    values: Map<String, Value>,
}

impl CommandLineArgs {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the map with `name` set to `value`.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set `name` to `value`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Value supplied for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Number of supplied values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate supplied values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Collect the values supplied on the command line from `matches`.
    ///
    /// `matches` must come from a command produced by [`build_command`] for
    /// the same schema.
    #[must_use]
    pub fn from_matches(schema: &Schema, matches: &ArgMatches) -> Self {
        let mut args = Self::new();
        if supplied(matches, DEPLOY_CONFIG_ARG)
            && let Some(path) = matches.get_one::<String>(DEPLOY_CONFIG_ARG)
        {
            args.insert(DEPLOY_CONFIG_ARG, path.clone());
        }
        for (_, leaf) in schema.leaves() {
            let Some(name) = leaf.get_command_line_arg() else {
                continue;
            };
            if !supplied(matches, name) {
                continue;
            }
            if let Some(value) = ArgKind::of(leaf).extract(matches, name) {
                args.insert(name, value);
            }
        }
        args
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for CommandLineArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ArgKind {
    Flag,
    Integer,
    Float,
    List,
    Text,
}

impl ArgKind {
    fn of(leaf: &LeafDefinition) -> Self {
        let default = leaf.get_default();
        let sample = if default.is_null() {
            leaf.get_values()
                .and_then(<[_]>::first)
                .unwrap_or(default)
        } else {
            default
        };
        match sample {
            Value::Bool(_) => Self::Flag,
            Value::Number(number) if number.is_f64() => Self::Float,
            Value::Number(_) => Self::Integer,
            Value::Array(_) => Self::List,
            _ => Self::Text,
        }
    }

    fn configure(self, arg: Arg) -> Arg {
        match self {
            Self::Flag => arg
                .num_args(0..=1)
                .default_missing_value("true")
                .value_parser(value_parser!(bool)),
            Self::Integer => arg.action(ArgAction::Set).value_parser(value_parser!(i64)),
            Self::Float => arg.action(ArgAction::Set).value_parser(value_parser!(f64)),
            Self::List => arg
                .action(ArgAction::Append)
                .value_parser(value_parser!(String)),
            Self::Text => arg.action(ArgAction::Set).value_parser(value_parser!(String)),
        }
    }

    fn extract(self, matches: &ArgMatches, id: &str) -> Option<Value> {
        match self {
            Self::Flag => matches.get_one::<bool>(id).copied().map(Value::Bool),
            Self::Integer => matches.get_one::<i64>(id).copied().map(Value::from),
            Self::Float => matches
                .get_one::<f64>(id)
                .copied()
                .and_then(Number::from_f64)
                .map(Value::Number),
            Self::List => matches
                .get_many::<String>(id)
                .map(|values| Value::Array(values.cloned().map(Value::String).collect())),
            Self::Text => matches.get_one::<String>(id).cloned().map(Value::String),
        }
    }
}

fn supplied(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ClapSource::CommandLine)
}

fn leaf_arg(name: &str, leaf: &LeafDefinition) -> Arg {
    let mut arg = Arg::new(name.to_owned()).long(name.to_kebab_case());
    if let Some(help) = leaf.get_description() {
        arg = arg.help(help.to_owned());
    }
    ArgKind::of(leaf).configure(arg)
}

fn deploy_config_arg() -> Arg {
    Arg::new(DEPLOY_CONFIG_ARG)
        .long("deploy-config")
        .visible_alias("dc")
        .value_name("PATH")
        .help("Path to the deploy-config file")
        .action(ArgAction::Set)
        .value_parser(value_parser!(String))
}

/// Extend `command` with `--deploy-config`/`--dc` and one flag per distinct
/// `commandLineArg`. Leaves sharing an argument share its flag, typed after
/// the first of them.
///
/// # Examples
///
/// ```
/// use clap::Command;
/// use scoped_config::{Branch, LeafDefinition, Schema, build_command};
///
/// let schema = Schema::new(
///     Branch::new().leaf("port", LeafDefinition::new().default_value(8081).command_line_arg("wsPort")),
/// )?;
/// let command = build_command(&schema, Command::new("socket-server"));
/// assert!(command.get_arguments().any(|arg| arg.get_long() == Some("ws-port")));
/// # Ok::<_, std::sync::Arc<scoped_config::ConfigError>>(())
/// ```
#[must_use]
pub fn build_command(schema: &Schema, command: Command) -> Command {
    let mut registered = HashSet::new();
    schema
        .leaves()
        .into_iter()
        .fold(command.arg(deploy_config_arg()), |cmd, (_, leaf)| {
            match leaf.get_command_line_arg() {
                Some(name) if registered.insert(name) => cmd.arg(leaf_arg(name, leaf)),
                _ => cmd,
            }
        })
}

/// Parse `argv` (including the program name) into a [`CommandLineArgs`].
///
/// # Errors
///
/// Returns [`crate::ConfigError::CliParsing`] when clap rejects the
/// arguments, including `--help` and `--version` requests (see
/// [`crate::is_display_request`]).
pub fn parse_args<I, T>(schema: &Schema, command: Command, argv: I) -> ConfigResult<CommandLineArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command(schema, command)
        .try_get_matches_from(argv)
        .into_config()?;
    Ok(CommandLineArgs::from_matches(schema, &matches))
}
