//! Error types for regkit.
//!
//! "Key or value not found" is not represented here. The executor reports it
//! as `Ok(None)`; only genuine failures become a [`RegError`].

use std::fmt;
use thiserror::Error;

/// A failure reported by the external tool on stderr.
///
/// Carries only the diagnostic text and the offending argument list. The
/// condition originated in another process, so no backtrace is captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    message: String,
    args: Vec<String>,
}

impl ToolError {
    /// Build from the tool's first stderr line (prefix already removed).
    pub fn new(diagnostic: &str, args: &[String]) -> Self {
        Self {
            message: format!("{} - Command 'reg {}'", diagnostic, args.join(" ")),
            args: args.to_vec(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ToolError {}

/// Main error type for regkit.
#[derive(Debug, Error)]
pub enum RegError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("Failed to launch {program}: {message}")]
    Spawn {
        program: String,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Invalid REG_BINARY data: {message}")]
    InvalidHex { message: String },

    #[error("Invalid integer data: {value:?}")]
    InvalidInteger { value: String },

    #[error("Unknown registry value type: {0}")]
    UnknownType(String),
}

/// Result type alias for regkit operations.
pub type Result<T> = std::result::Result<T, RegError>;

impl From<std::io::Error> for RegError {
    fn from(err: std::io::Error) -> Self {
        RegError::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<hex::FromHexError> for RegError {
    fn from(err: hex::FromHexError) -> Self {
        RegError::InvalidHex {
            message: err.to_string(),
        }
    }
}

impl RegError {
    /// Create a spawn error with the program that failed to start.
    pub fn spawn(err: std::io::Error, program: impl Into<String>) -> Self {
        RegError::Spawn {
            program: program.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// The diagnostic message if this is a tool-reported failure.
    pub fn tool_message(&self) -> Option<&str> {
        match self {
            RegError::Tool(err) => Some(err.message()),
            _ => None,
        }
    }
}
