//! Error types for command registration and dispatch
//!
//! Every failure of a `run` call is reported through [`CliError`]. Errors
//! raised by a command body are carried unchanged inside [`CliError::Command`].

use std::fmt;
use thiserror::Error;

/// What went wrong with the user's command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
    /// No command name was given
    NoCommand,
    /// Too few or too many positional arguments
    ArgumentCount,
    /// A value is missing, cannot be coerced or is not an allowed choice
    BadArgument,
    /// Unknown option
    InvalidOption,
}

impl fmt::Display for UsageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NoCommand => "no command",
            Self::ArgumentCount => "argument count",
            Self::BadArgument => "bad argument",
            Self::InvalidOption => "invalid option",
        };
        f.write_str(label)
    }
}

/// Main error type of the library
#[derive(Error, Debug)]
pub enum CliError {
    /// The command line does not match what the application expects
    #[error("{message}")]
    Usage {
        kind: UsageKind,
        message: String,
        usage: Option<String>,
    },

    /// The requested command is not registered
    #[error("unknown command '{name}' ({})", describe_known(.known))]
    UnknownCommand { name: String, known: Vec<String> },

    /// Failure raised inside a command body
    #[error(transparent)]
    Command(anyhow::Error),

    /// A command or parameter was declared incorrectly
    #[error("invalid command definition: {message}")]
    Definition { message: String },

    /// Invalid application configuration
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl CliError {
    /// Create a usage error
    pub fn usage(kind: UsageKind, message: impl Into<String>) -> Self {
        Self::Usage {
            kind,
            message: message.into(),
            usage: None,
        }
    }

    /// Create the error reported when no command is given
    pub fn no_command(usage: impl Into<String>) -> Self {
        Self::Usage {
            kind: UsageKind::NoCommand,
            message: "no command specified".to_string(),
            usage: Some(usage.into()),
        }
    }

    /// Create the error reported when a value cannot be coerced
    pub fn bad_argument(parameter: &str, value: &str, expected: impl fmt::Display) -> Self {
        Self::usage(
            UsageKind::BadArgument,
            format!("invalid value '{value}' for parameter '{parameter}': expected {expected}"),
        )
    }

    /// Create an unknown command error
    pub fn unknown_command(name: impl Into<String>, known: Vec<String>) -> Self {
        Self::UnknownCommand {
            name: name.into(),
            known,
        }
    }

    /// Create a definition error
    pub fn definition(message: impl Into<String>) -> Self {
        Self::Definition {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Attach usage guidance to a usage error; other variants are returned as is
    #[must_use]
    pub fn with_usage(self, text: impl Into<String>) -> Self {
        match self {
            Self::Usage { kind, message, .. } => Self::Usage {
                kind,
                message,
                usage: Some(text.into()),
            },
            other => other,
        }
    }

    /// The usage kind, if this is a usage error
    pub fn usage_kind(&self) -> Option<UsageKind> {
        match self {
            Self::Usage { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage { .. } | Self::UnknownCommand { .. } => 2,
            Self::Command(_) | Self::Definition { .. } | Self::Config { .. } => 1,
        }
    }
}

fn describe_known(known: &[String]) -> String {
    if known.is_empty() {
        "no commands registered".to_string()
    } else {
        format!("known commands: {}", known.join(", "))
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CliError>;
