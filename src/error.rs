//! Error types for this crate. Manual `std::error::Error` + `Display` impls,
//! matching the project's style elsewhere: no `thiserror`, no `anyhow`.

use std::fmt;

/// A machine text, config file, or certificate failed to parse.
#[derive(Debug)]
pub struct ParseError {
    message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::error::Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<std::io::Error> for ParseError {
    fn from(error: std::io::Error) -> Self {
        ParseError {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(error: serde_json::Error) -> Self {
        ParseError {
            message: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for ParseError {
    fn from(error: toml::de::Error) -> Self {
        ParseError {
            message: error.to_string(),
        }
    }
}

/// A worker thread panicked while deciding a machine. Carries the input line
/// that triggered it, so the caller can still report which machine failed.
#[derive(Debug)]
pub struct RuntimeFault {
    pub input: String,
    pub message: String,
}

impl std::error::Error for RuntimeFault {}

impl fmt::Display for RuntimeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panic while deciding {:?}: {}", self.input, self.message)
    }
}
