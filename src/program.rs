//! Registration entry point.
//!
//! A [`Program`] is built once from a function or an object and can then be
//! dispatched any number of times. With `auto_dispatch` on, [`Program::invoke`]
//! parses the process arguments and calls the handler; with it off, invoke is
//! a no-op and the caller drives [`Program::parse`] / [`Program::dispatch`].

use crate::dispatch::{self, Invocation, Schema};
use crate::error::{DocargsError, Result};
use crate::registry::{register, CommandSet};
use crate::schema::{Callable, CommandSpec};
use crate::value::Value;
use std::ffi::OsString;
use std::path::Path;
use tracing::{debug, error};

/// Options given at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Program name in usage lines; defaults to the executable name.
    pub prog_name: Option<String>,
    /// Whether [`Program::invoke`] parses the process arguments.
    pub auto_dispatch: bool,
    /// Members starting with this prefix are not exposed. Empty exposes everything.
    pub private_prefix: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            prog_name: None,
            auto_dispatch: true,
            private_prefix: "_".to_string(),
        }
    }
}

impl Options {
    /// Sets the program name.
    pub fn prog_name(mut self, name: impl Into<String>) -> Self {
        self.prog_name = Some(name.into());
        self
    }

    /// Sets whether invoke dispatches automatically.
    pub fn auto_dispatch(mut self, auto_dispatch: bool) -> Self {
        self.auto_dispatch = auto_dispatch;
        self
    }

    /// Returns true if a member with this name is exposed.
    pub fn is_exposed(&self, name: &str) -> bool {
        self.private_prefix.is_empty() || !name.starts_with(&self.private_prefix)
    }
}

/// A registered program.
#[derive(Debug, Clone)]
pub struct Program {
    schema: Schema,
    options: Options,
}

impl Program {
    /// Registers a single function.
    pub fn function(callable: Callable, options: Options) -> Result<Self> {
        let spec = CommandSpec::from_callable(&callable)?;
        Ok(Self {
            schema: Schema::Single(spec),
            options,
        })
    }

    /// Registers an object, one subcommand per exposed member.
    pub fn registry<T: CommandSet + ?Sized>(instance: &T, options: Options) -> Result<Self> {
        let registry = register(instance, |name| options.is_exposed(name))?;
        Ok(Self {
            schema: Schema::Multi(registry),
            options,
        })
    }

    /// Returns the derived schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the registration options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the name shown in usage lines.
    pub fn prog_name(&self) -> String {
        if let Some(name) = &self.options.prog_name {
            return name.clone();
        }

        let from_argv = std::env::args_os().next().and_then(|arg0| {
            Path::new(&arg0)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        });

        from_argv.unwrap_or_else(|| match &self.schema {
            Schema::Single(spec) => spec.name.clone(),
            Schema::Multi(_) => "program".to_string(),
        })
    }

    /// Parses an argument vector (without program name) without calling the handler.
    pub fn parse<I, T>(&self, argv: I) -> Result<Invocation<'_>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        dispatch::parse(&self.schema, &self.prog_name(), argv)
    }

    /// Parses an argument vector (without program name) and calls the handler.
    pub fn dispatch<I, T>(&self, argv: I) -> Result<Value>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        dispatch::dispatch(&self.schema, &self.prog_name(), argv)
    }

    /// Returns the top-level help text.
    pub fn help(&self) -> String {
        dispatch::render_help(&self.schema, &self.prog_name())
    }

    /// Dispatches the process arguments when `auto_dispatch` is on.
    ///
    /// Returns `Ok(None)` without parsing when it is off.
    pub fn try_invoke(&self) -> Result<Option<Value>> {
        if !self.options.auto_dispatch {
            debug!("auto dispatch disabled, not parsing process arguments");
            return Ok(None);
        }
        self.dispatch(std::env::args_os().skip(1)).map(Some)
    }

    /// Like [`Program::try_invoke`], but exits the process on failure.
    ///
    /// Help requests print to stdout and exit 0; usage errors print to stderr
    /// and exit 2; handler and other errors exit 1.
    pub fn invoke(&self) -> Option<Value> {
        match self.try_invoke() {
            Ok(value) => value,
            Err(DocargsError::Parse(e)) => e.exit(),
            Err(e) => {
                error!("{}: {}", e.category(), e);
                eprintln!("{}: {e}", self.prog_name());
                std::process::exit(e.exit_code());
            }
        }
    }
}
