//! Argument parsing and dispatch.
//!
//! Translates derived schemas into `clap` commands, parses argument vectors
//! against them and invokes the selected handler with the resolved values.
//! Tokenizing, usage text and help output all belong to `clap`.

use crate::error::{DocargsError, Result};
use crate::registry::CommandRegistry;
use crate::schema::{Action, ArgKind, ArgumentSpec, CommandSpec};
use crate::value::{NumericType, Value};
use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

/// A derived schema: one command, or one subcommand per exposed member.
#[derive(Debug, Clone)]
pub enum Schema {
    /// Single-function program.
    Single(CommandSpec),
    /// Multi-command program.
    Multi(CommandRegistry),
}

impl From<CommandSpec> for Schema {
    fn from(spec: CommandSpec) -> Self {
        Schema::Single(spec)
    }
}

impl From<CommandRegistry> for Schema {
    fn from(registry: CommandRegistry) -> Self {
        Schema::Multi(registry)
    }
}

/// Resolved arguments, keyed by declared parameter name, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: Vec<(String, Value)>,
}

impl Arguments {
    /// Creates an argument map from name/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the value bound to a parameter.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Returns a string argument.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns an integer argument.
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    /// Returns a numeric argument as f64.
    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    /// Returns a boolean argument, false when absent.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Iterates over name/value pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of bound parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no parameter is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Renders the arguments as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::json!(v)))
                .collect(),
        )
    }

    fn push(&mut self, name: &str, value: Value) {
        self.values.push((name.to_string(), value));
    }
}

impl Serialize for Arguments {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (k, v) in &self.values {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// A parsed command line: the selected command and its arguments.
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    /// Command to invoke.
    pub command: &'a CommandSpec,
    /// Resolved arguments.
    pub arguments: Arguments,
}

impl Invocation<'_> {
    /// Calls the handler and propagates its result.
    pub fn invoke(&self) -> Result<Value> {
        debug!(command = %self.command.name, "invoking handler");
        (self.command.handler)(&self.arguments).map_err(DocargsError::Handler)
    }
}

/// Builds the `clap` command for a schema.
///
/// The argument vector handed to the command must not include the program name.
pub fn build_command(schema: &Schema, prog: &str) -> Command {
    let command = match schema {
        Schema::Single(spec) => with_arguments(base_command(prog, &spec.help_text), spec),
        Schema::Multi(registry) => registry.subcommands.values().fold(
            base_command(prog, &registry.description)
                .subcommand_required(true)
                .disable_help_subcommand(true)
                .subcommand_value_name("COMMAND"),
            |cmd, spec| {
                cmd.subcommand(with_arguments(base_command(&spec.name, &spec.help_text), spec))
            },
        ),
    };
    command.bin_name(prog.to_string()).no_binary_name(true)
}

/// Repeated flags override earlier occurrences, so the last value wins.
fn base_command(name: &str, about: &str) -> Command {
    let cmd = Command::new(name.to_string()).args_override_self(true);
    if about.is_empty() {
        cmd
    } else {
        cmd.about(about.to_string())
    }
}

fn with_arguments(cmd: Command, spec: &CommandSpec) -> Command {
    spec.arguments
        .iter()
        .fold(cmd, |cmd, arg| cmd.arg(to_clap_arg(arg)))
}

/// Translates one argument definition into a `clap` argument.
fn to_clap_arg(spec: &ArgumentSpec) -> Arg {
    let mut arg = Arg::new(spec.name.clone());

    if let Some(help) = &spec.help_text {
        arg = arg.help(help.clone());
    }

    match spec.kind {
        ArgKind::Positional => {
            arg = arg
                .value_name(spec.display_name.clone())
                .required(!spec.nargs_optional);
        }
        ArgKind::Optional => {
            let mut short = spec.name.chars();
            arg = match (short.next(), short.next()) {
                (Some(c), None) => arg.short(c),
                _ => arg.long(spec.name.clone()),
            };
        }
    }

    match spec.action {
        Action::StoreTrue => arg.action(ArgAction::SetTrue),
        Action::StoreFalse => arg.action(ArgAction::SetFalse),
        Action::Store => {
            if spec.kind == ArgKind::Optional {
                arg = arg.value_name(spec.name.to_uppercase());
            }
            let arg = arg.action(ArgAction::Set);
            match spec.value_type {
                Some(NumericType::Int) => arg
                    .value_parser(value_parser!(i64))
                    .allow_negative_numbers(true),
                Some(NumericType::Float) => arg
                    .value_parser(value_parser!(f64))
                    .allow_negative_numbers(true),
                None => arg.value_parser(value_parser!(String)),
            }
        }
    }
}

/// Parses an argument vector (without program name) against a schema.
pub fn parse<'a, I, T>(schema: &'a Schema, prog: &str, argv: I) -> Result<Invocation<'a>>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let mut command = build_command(schema, prog);
    let matches = command.try_get_matches_from_mut(argv)?;

    let (spec, matches) = match schema {
        Schema::Single(spec) => (spec, &matches),
        Schema::Multi(registry) => match matches.subcommand() {
            Some((name, sub_matches)) => (registry.get(name)?, sub_matches),
            None => {
                return Err(command
                    .error(ErrorKind::MissingSubcommand, "a subcommand is required")
                    .into())
            }
        },
    };

    let arguments = resolve(spec, matches)?;
    debug!(command = %spec.name, arguments = %arguments.to_json(), "parsed command line");

    Ok(Invocation {
        command: spec,
        arguments,
    })
}

/// Parses an argument vector and invokes the selected handler.
pub fn dispatch<I, T>(schema: &Schema, prog: &str, argv: I) -> Result<Value>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    parse(schema, prog, argv)?.invoke()
}

/// Renders the top-level help text for a schema.
pub fn render_help(schema: &Schema, prog: &str) -> String {
    build_command(schema, prog).render_help().to_string()
}

/// Reads every argument of a command out of the parser's matches.
fn resolve(spec: &CommandSpec, matches: &ArgMatches) -> Result<Arguments> {
    let mut arguments = Arguments::default();

    for arg in &spec.arguments {
        let parsed = match arg.action {
            Action::StoreTrue | Action::StoreFalse => read::<bool>(matches, arg)?.map(Value::Bool),
            Action::Store => match arg.value_type {
                Some(NumericType::Int) => read::<i64>(matches, arg)?.map(Value::Int),
                Some(NumericType::Float) => read::<f64>(matches, arg)?.map(Value::Float),
                None => read::<String>(matches, arg)?.map(Value::Str),
            },
        };

        let value = match parsed {
            Some(value) => value,
            None => arg.default.clone().unwrap_or_default(),
        };
        arguments.push(&arg.name, value);
    }

    Ok(arguments)
}

fn read<T>(matches: &ArgMatches, arg: &ArgumentSpec) -> Result<Option<T>>
where
    T: Clone + Send + Sync + 'static,
{
    matches
        .try_get_one::<T>(&arg.name)
        .map(|v| v.cloned())
        .map_err(|e| DocargsError::internal(format!("argument '{}': {e}", arg.name)))
}
