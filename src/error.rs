//! Error types for pltx.

use std::fmt;
use std::io;

/// The main error type for pltx operations.
#[derive(Debug)]
pub enum StyleError {
    /// Unknown preset, palette or option name
    Configuration(String),
    /// Out-of-range numeric input (negative index, non-positive width, ...)
    InvalidArgument(String),
    /// Error reading a style file
    Io(io::Error),
    /// Malformed JSON in a style file
    Json(serde_json::Error),
}

impl StyleError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        StyleError::Configuration(msg.into())
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        StyleError::InvalidArgument(msg.into())
    }

    /// True for unknown preset/palette/option names.
    pub fn is_configuration(&self) -> bool {
        matches!(self, StyleError::Configuration(_))
    }

    /// True for out-of-range numeric input.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, StyleError::InvalidArgument(_))
    }
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            StyleError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            StyleError::Io(err) => write!(f, "IO error: {}", err),
            StyleError::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for StyleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StyleError::Io(err) => Some(err),
            StyleError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for StyleError {
    fn from(err: io::Error) -> Self {
        StyleError::Io(err)
    }
}

impl From<serde_json::Error> for StyleError {
    fn from(err: serde_json::Error) -> Self {
        // Unknown keys and mistyped values are reported as data errors.
        if err.is_data() {
            StyleError::Configuration(err.to_string())
        } else {
            StyleError::Json(err)
        }
    }
}

/// Result type alias for pltx operations.
pub type StyleResult<T> = Result<T, StyleError>;
