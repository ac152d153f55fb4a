// src/error.rs

//! Unified error handling for permit collection.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for permit operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Broad class of a failure, used to pick the CLI exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing input, or a rejected HTTP response.
    Parse,
    /// The remote host could not be reached or the transfer broke off.
    Network,
}

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Report content is missing or carries no permit markers
    #[error("{0}")]
    Parse(String),

    /// A named input file does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Remote report answered with a non-success status
    #[error("Failed to fetch report (HTTP {status}): {url}")]
    HttpStatus { url: String, status: u16 },

    /// Connection or TLS setup to the report host failed
    #[error("Unable to reach {url} (network/SSL issue): {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Any other transport failure while fetching
    #[error("Network error while fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a report parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl fmt::Display) -> Self {
        Self::Validation(message.to_string())
    }

    /// Classify a transport failure from reqwest.
    ///
    /// Status failures are reported through [`AppError::HttpStatus`] by the
    /// caller before this point, so only connect-level and generic failures
    /// are distinguished here.
    pub fn from_transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_connect() {
            Self::Connect { url, source }
        } else {
            Self::Network { url, source }
        }
    }

    /// Broad class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Connect { .. } | Self::Network { .. } => ErrorKind::Network,
            _ => ErrorKind::Parse,
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> u8 {
        match self.kind() {
            ErrorKind::Parse => 1,
            ErrorKind::Network => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_class_exit_code() {
        assert_eq!(AppError::parse("No report content provided.").exit_code(), 1);
        assert_eq!(AppError::FileNotFound("x.txt".into()).exit_code(), 1);
        let status = AppError::HttpStatus {
            url: "https://example.com".to_string(),
            status: 503,
        };
        assert_eq!(status.kind(), ErrorKind::Parse);
        assert_eq!(status.exit_code(), 1);
    }

    #[test]
    fn test_file_not_found_message() {
        let err = AppError::FileNotFound(PathBuf::from("reports/weekly.txt"));
        assert_eq!(err.to_string(), "File not found: reports/weekly.txt");
    }

    #[test]
    fn test_parse_message_is_verbatim() {
        let err = AppError::parse("Provided report does not contain recognizable permit data.");
        assert_eq!(
            err.to_string(),
            "Provided report does not contain recognizable permit data."
        );
    }
}
