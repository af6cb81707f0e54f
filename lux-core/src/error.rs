//! Error types for lux
//!
//! Only persistence and configuration problems are errors. Empty knowledge,
//! missed matches, duplicate questions and unreadable ratings are ordinary
//! outcomes and are returned as values by the components that produce them.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the core
#[derive(Debug, Error)]
pub enum LuxError {
    /// Reading or writing a store failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A store held JSON we could not encode or decode
    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration values are unusable
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl LuxError {
    /// Create an I/O error bound to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Create a JSON error bound to a path
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json { path: path.into(), source }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }
}

/// Result type for core operations
pub type LuxResult<T> = Result<T, LuxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LuxError::config("auto_save_interval must be at least 1");
        assert_eq!(err.to_string(), "Configuration error: auto_save_interval must be at least 1");

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = LuxError::io("knowledge_base.json", io);
        assert!(err.to_string().starts_with("I/O error on knowledge_base.json"));
    }

    #[test]
    fn test_error_conversion() {
        let toml_err = toml::from_str::<toml::Table>("not = = toml").unwrap_err();
        let err: LuxError = toml_err.into();
        assert!(matches!(err, LuxError::ConfigParse(_)));

        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err = LuxError::json("stats_file.json", json_err);
        assert!(matches!(err, LuxError::Json { .. }));
    }
}
