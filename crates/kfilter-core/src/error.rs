//! Error types for kfilter-core
//!
//! Centralized error handling using `thiserror` for ergonomic error definitions.
//! Tree filtering itself never fails, so only parsing, the document codec and
//! configuration contribute variants here.

use thiserror::Error;

/// Main error type for kfilter-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Filter expression could not be parsed
    #[error("Invalid filter expression '{token}': {message}")]
    Parse {
        /// The offending rule token
        token: String,
        /// Detailed error message
        message: String,
    },

    /// Document bytes could not be decoded
    #[error("Failed to decode {format} document: {message}")]
    Decode {
        /// Format the decoder attempted
        format: &'static str,
        /// Error message
        message: String,
    },

    /// Document could not be encoded
    #[error("Failed to encode {format} document: {message}")]
    Encode {
        /// Target format
        format: &'static str,
        /// Error message
        message: String,
    },

    /// Unknown output format name
    #[error("Unknown output format '{0}' (expected json or yaml)")]
    UnknownFormat(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to the missing config file
        path: String,
    },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    ConfigValue {
        /// Configuration key
        key: String,
        /// Error message
        message: String,
    },

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a parse error for a rule token
    pub fn parse(token: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            token: token.into(),
            message: message.into(),
        }
    }

    /// Create a config value error
    pub fn config_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::parse("a..b", "empty path segment");
        assert!(err.to_string().contains("a..b"));
        assert!(err.to_string().contains("empty path segment"));

        let err = Error::config_value("output.json_indent", "Must be at most 16");
        assert!(err.to_string().contains("output.json_indent"));
    }

    #[test]
    fn test_parse_error_fields() {
        let err = Error::parse("+", "missing path after marker");
        match err {
            Error::Parse { token, .. } => assert_eq!(token, "+"),
            _ => panic!("Wrong error type"),
        }
    }
}
