//! Error types for docargs.
//!
//! Defines the main error enum used throughout the derivation and dispatch layers.

use thiserror::Error;

/// Main error type for docargs operations.
#[derive(Error, Debug)]
pub enum DocargsError {
    /// Declaration errors (bad literal, duplicate parameter, variadic marker, etc.)
    #[error("Signature error: {0}")]
    Signature(String),

    /// Schema errors (flag collisions, positional ordering the parser cannot express, etc.)
    #[error("Schema error: {0}")]
    Schema(String),

    /// Argument vector rejected by the parser, including help and usage requests.
    #[error("{0}")]
    Parse(#[from] clap::Error),

    /// Subcommand name that is not part of the registry.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Error returned by an invoked handler.
    #[error("Handler error: {0}")]
    Handler(#[source] anyhow::Error),

    /// Configuration errors (unreadable or invalid config file).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal errors (parser and schema out of step, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DocargsError {
    /// Creates a signature error with the given message.
    pub fn signature(msg: impl Into<String>) -> Self {
        Self::Signature(msg.into())
    }

    /// Creates a schema error with the given message.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Creates an unknown command error for the given name.
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::UnknownCommand(name.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Signature(_) => "Signature Error",
            Self::Schema(_) => "Schema Error",
            Self::Parse(_) => "Usage Error",
            Self::UnknownCommand(_) => "Usage Error",
            Self::Handler(_) => "Handler Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }

    /// Returns the process exit code for this error.
    ///
    /// Parse errors carry the parser's own code (0 for `--help`, 2 for usage errors).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Parse(e) => e.exit_code(),
            Self::UnknownCommand(_) => 2,
            _ => 1,
        }
    }
}

/// Result type alias using DocargsError.
pub type Result<T> = std::result::Result<T, DocargsError>;
