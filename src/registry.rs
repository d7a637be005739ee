//! Command registry for multi-command programs.
//!
//! An object exposes its methods as [`Callable`]s; every member that passes the
//! visibility filter becomes one subcommand named after it.

use crate::error::{DocargsError, Result};
use crate::schema::{Callable, CommandSpec, PRIVATE_MARKER};
use std::collections::BTreeMap;
use tracing::debug;

/// An object whose methods become subcommands.
pub trait CommandSet {
    /// Documentation of the object itself, shown as the program description.
    fn doc(&self) -> Option<&str> {
        None
    }

    /// All callable members, public and private.
    ///
    /// A member that fails to declare fails registration.
    fn members(&self) -> Result<Vec<Callable>>;
}

/// Default visibility policy: members starting with `_` are private.
pub fn filter_private_methods(name: &str) -> bool {
    !name.starts_with(PRIVATE_MARKER)
}

/// Subcommands keyed by name, in alphabetical order.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    /// Program description (main text of the object's docstring).
    pub description: String,
    /// Subcommands by name.
    pub subcommands: BTreeMap<String, CommandSpec>,
}

impl CommandRegistry {
    /// Returns the subcommand with the given name.
    pub fn get(&self, name: &str) -> Result<&CommandSpec> {
        self.subcommands
            .get(name)
            .ok_or_else(|| DocargsError::unknown_command(name))
    }

    /// Returns subcommand names in help order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.subcommands.keys().map(String::as_str)
    }

    /// Returns the number of subcommands.
    pub fn len(&self) -> usize {
        self.subcommands.len()
    }

    /// Returns true if no member was exposed.
    pub fn is_empty(&self) -> bool {
        self.subcommands.is_empty()
    }
}

/// Builds a registry from an object, keeping members accepted by `filter`.
pub fn register<T, F>(instance: &T, filter: F) -> Result<CommandRegistry>
where
    T: CommandSet + ?Sized,
    F: Fn(&str) -> bool,
{
    register_members(instance.doc(), instance.members()?, filter)
}

/// Builds a registry from a description and a list of members.
pub fn register_members<I, F>(doc: Option<&str>, members: I, filter: F) -> Result<CommandRegistry>
where
    I: IntoIterator<Item = Callable>,
    F: Fn(&str) -> bool,
{
    let mut registry = CommandRegistry {
        description: crate::docstring::analyze(doc).main_text,
        subcommands: BTreeMap::new(),
    };

    for member in members {
        if !filter(&member.name) {
            debug!(member = %member.name, "skipping filtered member");
            continue;
        }

        let spec = CommandSpec::from_callable(&member)?;
        if registry.subcommands.contains_key(&spec.name) {
            return Err(DocargsError::schema(format!(
                "member '{}' is registered twice",
                spec.name
            )));
        }
        debug!(subcommand = %spec.name, "registered subcommand");
        registry.subcommands.insert(spec.name.clone(), spec);
    }

    Ok(registry)
}
