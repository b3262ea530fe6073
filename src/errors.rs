//! Error taxonomy: configuration, introspection, binding and usage errors.
//!
//! Binding errors are user-input problems and get routed to per-command
//! help. Registry and signature errors are programming/configuration
//! mistakes and are never shown as help.

use thiserror::Error;

use crate::value::ValueType;

/// Configuration errors raised while registering commands or resolving the
/// configured main command. Not user-recoverable at runtime.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate command name: '{0}'")]
    DuplicateName(String),

    #[error("'{second}' cannot be the main command: '{first}' already is")]
    DuplicateMain { first: String, second: String },

    #[error("configured main command '{0}' is not registered")]
    UnknownMain(String),
}

/// Introspection failed: the handler chain bottoms out without exposing a
/// signature. Fatal; this is not a user-input problem.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SignatureError {
    #[error("command '{0}' exposes no introspectable signature")]
    Opaque(String),
}

/// Failures while binding command-line tokens onto parameters.
/// All of these are detected before the handler is invoked.
#[derive(Error, Debug, PartialEq)]
pub enum BindError {
    /// The option tokenizer rejected the argument vector
    /// (unknown option, malformed value, ...). Carries its rendered message.
    #[error("{0}")]
    Tokenize(String),

    #[error("Too many arguments")]
    TooManyArguments,

    /// Leftover positionals remain but only switch-typed parameters do.
    #[error("Too many arguments: True/False must be specified via switches")]
    TooManyArgumentsForSwitches,

    /// The same non-list parameter received conflicting values from an
    /// explicit option and a positional.
    #[error("Repeated option: {name}\nOption: {option}\nArgument: {argument}")]
    RepeatedOption {
        name: String,
        option: String,
        argument: String,
    },

    #[error("All options without default values must be specified")]
    MissingRequired,

    #[error("Invalid {expected} value for '{name}': '{value}'")]
    InvalidValue {
        name: String,
        expected: ValueType,
        value: String,
    },
}

/// Signaled by a command body after successful binding to report bad
/// semantic input. The dispatcher redirects it to the command's help
/// instead of propagating it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct UsageError {
    pub message: String,
}

impl UsageError {
    pub fn new(message: impl Into<String>) -> Self {
        UsageError {
            message: message.into(),
        }
    }
}
