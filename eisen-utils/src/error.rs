//! Error types for eisen
//!
//! Provides a unified error type used across all eisen crates.

use std::path::PathBuf;

/// Main error type for eisen operations
#[derive(Debug, thiserror::Error)]
pub enum EisenError {
    // === IO Errors ===

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    // === Transport Errors ===

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    // === API Errors ===

    #[error("Matrix with ID {id} not found")]
    MatrixNotFound { id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Server returned {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    // === Configuration Errors ===

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    // === Internal Errors ===

    #[error("Internal error: {0}")]
    Internal(String),
}

impl EisenError {
    /// Create an HTTP transport error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an invalid response error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Check if the server reported the matrix as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MatrixNotFound { .. })
    }

    /// Check if the server rejected a duplicate
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// HTTP status carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::MatrixNotFound { .. } => Some(404),
            Self::Conflict(_) => Some(409),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias using EisenError
pub type Result<T> = std::result::Result<T, EisenError>;
