//! docargs - derive a command-line interface from signatures and docstrings.
//!
//! A function (or each public method of an object) is declared once with its
//! parameter list and documentation. From that, docargs derives positional
//! arguments, flags, boolean switches, numeric coercion and help text, and
//! dispatches parsed command lines to the right handler.
//!
//! ```no_run
//! use docargs::{Callable, Options, Program, Value};
//!
//! # fn main() -> docargs::Result<()> {
//! let greet = Callable::declare("greet(name, count=1, greeting='Hello')", |args| {
//!     for _ in 0..args.int("count").unwrap_or(1) {
//!         println!("{} {}", args.str("greeting").unwrap_or_default(), args.str("name").unwrap_or_default());
//!     }
//!     Ok(Value::None)
//! })?
//! .doc("A simple greeting program\n:param name: Name to greet.");
//!
//! Program::function(greet, Options::default())?.invoke();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dispatch;
pub mod docstring;
pub mod error;
pub mod logging;
pub mod program;
pub mod registry;
pub mod schema;
pub mod signature;
pub mod value;

pub use dispatch::{dispatch, parse, Arguments, Invocation, Schema};
pub use docstring::{analyze, DocHelp};
pub use error::{DocargsError, Result};
pub use program::{Options, Program};
pub use registry::{filter_private_methods, register, register_members, CommandRegistry, CommandSet};
pub use schema::{build, Action, ArgKind, ArgumentSpec, Callable, CommandSpec, Handler};
pub use signature::{introspect, introspect_parts, ParameterInfo, Signature};
pub use value::{NumericType, Value};
