//! Schema derivation.
//!
//! Turns declared parameters plus docstring help into argument definitions
//! the parser understands. The rules, per parameter:
//!
//! - no default: positional; with a default: optional flag
//! - a default of the bare `int`/`float` type: positional, coerced to that type
//! - a default of `True`/`False`: the flag stores the opposite boolean
//! - a numeric default: the flag value is coerced to that numeric type
//! - flags are `-x` for one-character names, `--name` otherwise
//! - a positional whose name starts with `_` may be omitted (`[dest]`)

use crate::docstring::{analyze, DocHelp};
use crate::error::{DocargsError, Result};
use crate::signature::{parse_declaration, ParameterInfo, Signature};
use crate::value::{NumericType, Value};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Marker that makes a positional argument optional, and a member private.
pub const PRIVATE_MARKER: char = '_';

/// Handler invoked with the resolved arguments of a command.
pub type Handler = Arc<dyn Fn(&crate::dispatch::Arguments) -> anyhow::Result<Value> + Send + Sync>;

/// Whether an argument is given by position or by flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Supplied by position, no flag name.
    Positional,
    /// Supplied through `-x` / `--name`.
    Optional,
}

/// What the parser does when it sees an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Store the supplied value.
    Store,
    /// Store `true` when the flag is present.
    StoreTrue,
    /// Store `false` when the flag is present.
    StoreFalse,
}

/// Definition of one command argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentSpec {
    /// Parameter name as declared; the key the handler sees.
    pub name: String,
    /// Positional or flag.
    pub kind: ArgKind,
    /// Numeric coercion applied to the parsed string.
    pub value_type: Option<NumericType>,
    /// Parser action.
    pub action: Action,
    /// Positional that accepts zero or one occurrence.
    pub nargs_optional: bool,
    /// Help text from the docstring.
    pub help_text: Option<String>,
    /// Value used when the argument is omitted.
    pub default: Option<Value>,
    /// External flag (`-x` / `--name`) for optional arguments.
    pub flag: Option<String>,
    /// Name shown in usage and help (leading marker stripped for optional positionals).
    pub display_name: String,
}

impl ArgumentSpec {
    /// Returns true for positional arguments.
    pub fn is_positional(&self) -> bool {
        self.kind == ArgKind::Positional
    }

    /// Returns the name users type or see: the flag, or the display name.
    pub fn external_name(&self) -> &str {
        self.flag.as_deref().unwrap_or(&self.display_name)
    }

    /// Returns true if the parser must see this argument.
    pub fn is_required(&self) -> bool {
        self.is_positional() && !self.nargs_optional
    }
}

/// Derives the argument definition for a single parameter.
pub fn derive_argument(param: &ParameterInfo, doc: &DocHelp) -> ArgumentSpec {
    let default = param.default.clone();
    let marker = default.as_ref().and_then(Value::type_marker);

    let mut positional = !param.has_default();
    let mut value_type = None;

    // A bare type used as a default declares a typed positional.
    if let Some(ty) = marker {
        positional = true;
        value_type = Some(ty);
    }

    let action = match default {
        Some(Value::Bool(true)) => Action::StoreFalse,
        Some(Value::Bool(false)) => Action::StoreTrue,
        _ => Action::Store,
    };

    if let Some(ty) = default.as_ref().and_then(Value::numeric_type) {
        value_type = Some(ty);
    }

    let mut spec = ArgumentSpec {
        name: param.name.clone(),
        kind: if positional {
            ArgKind::Positional
        } else {
            ArgKind::Optional
        },
        value_type,
        action,
        nargs_optional: false,
        help_text: doc.param(&param.name).map(str::to_string),
        default: None,
        flag: None,
        display_name: param.name.clone(),
    };

    if positional {
        if param.name.starts_with(PRIVATE_MARKER) {
            spec.nargs_optional = true;
            spec.default = Some(Value::None);
            spec.display_name = param.name.trim_start_matches(PRIVATE_MARKER).to_string();
        }
    } else {
        spec.default = default;
        spec.flag = Some(if param.name.chars().count() == 1 {
            format!("-{}", param.name)
        } else {
            format!("--{}", param.name)
        });
    }

    spec
}

/// Builds the ordered argument list for a parameter list.
pub fn build(params: &[ParameterInfo], doc: &DocHelp) -> Result<Vec<ArgumentSpec>> {
    let specs: Vec<ArgumentSpec> = params.iter().map(|p| derive_argument(p, doc)).collect();
    validate(&specs)?;

    for spec in &specs {
        debug!(
            name = %spec.name,
            external = %spec.external_name(),
            kind = ?spec.kind,
            action = ?spec.action,
            value_type = ?spec.value_type,
            "derived argument"
        );
    }

    Ok(specs)
}

/// Rejects schemas the parser cannot represent.
fn validate(specs: &[ArgumentSpec]) -> Result<()> {
    let mut optional_positional: Option<&ArgumentSpec> = None;
    let mut external_names = HashSet::new();

    for spec in specs {
        if !external_names.insert(spec.external_name()) {
            return Err(DocargsError::schema(format!(
                "parameter '{}' shows up as '{}', which is already taken",
                spec.name,
                spec.external_name()
            )));
        }

        match spec.flag.as_deref() {
            Some(flag @ ("-h" | "--help")) => {
                return Err(DocargsError::schema(format!(
                    "parameter '{}' would use {flag}, which is reserved for help",
                    spec.name
                )));
            }
            None if spec.name == "help" || spec.display_name.is_empty() => {
                return Err(DocargsError::schema(format!(
                    "positional parameter '{}' has an unusable display name",
                    spec.name
                )));
            }
            _ => {}
        }

        if spec.is_positional() {
            if spec.nargs_optional {
                optional_positional.get_or_insert(spec);
            } else if let Some(earlier) = optional_positional {
                return Err(DocargsError::schema(format!(
                    "required positional '{}' follows optional positional '{}'",
                    spec.name, earlier.name
                )));
            }
        }
    }

    Ok(())
}

/// A callable exposed on the command line, before derivation.
#[derive(Clone)]
pub struct Callable {
    /// Command name.
    pub name: String,
    /// Documentation text, mined for help.
    pub doc: Option<String>,
    /// Parameters, receiver removed.
    pub params: Vec<ParameterInfo>,
    /// Function invoked on dispatch.
    pub handler: Handler,
}

impl Callable {
    /// Creates a callable from a name, a signature and a handler.
    pub fn new<F>(name: impl Into<String>, signature: Signature, handler: F) -> Result<Self>
    where
        F: Fn(&crate::dispatch::Arguments) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Ok(Self {
            name: name.into(),
            doc: None,
            params: signature.into_params()?,
            handler: Arc::new(handler),
        })
    }

    /// Creates a callable from a declaration literal like `greet(name, count=1)`.
    pub fn declare<F>(decl: &str, handler: F) -> Result<Self>
    where
        F: Fn(&crate::dispatch::Arguments) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        let decl = parse_declaration(decl)?;
        let name = decl.name.ok_or_else(|| {
            DocargsError::signature("declaration needs a name, e.g. 'greet(name)'")
        })?;
        Ok(Self {
            name,
            doc: None,
            params: decl.params,
            handler: Arc::new(handler),
        })
    }

    /// Attaches documentation text.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// A derived command: help text, arguments and the handler to call.
#[derive(Clone)]
pub struct CommandSpec {
    /// Command name.
    pub name: String,
    /// Main docstring text.
    pub help_text: String,
    /// Arguments in declaration order.
    pub arguments: Vec<ArgumentSpec>,
    /// Function invoked on dispatch.
    pub handler: Handler,
}

impl CommandSpec {
    /// Derives the command for a callable.
    pub fn from_callable(callable: &Callable) -> Result<Self> {
        let doc = analyze(callable.doc.as_deref());
        let arguments = build(&callable.params, &doc)?;
        debug!(
            command = %callable.name,
            arguments = arguments.len(),
            "derived command"
        );
        Ok(Self {
            name: callable.name.clone(),
            help_text: doc.main_text,
            arguments,
            handler: callable.handler.clone(),
        })
    }

    /// Finds an argument by its declared name.
    pub fn argument(&self, name: &str) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|a| a.name == name)
    }

    /// Returns the declared names of all arguments with their defaults.
    pub fn defaults(&self) -> HashMap<&str, &Value> {
        self.arguments
            .iter()
            .filter_map(|a| a.default.as_ref().map(|d| (a.name.as_str(), d)))
            .collect()
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("help_text", &self.help_text)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}
