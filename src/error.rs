// src/error.rs

//! Unified error handling for the sweep pipeline.

use std::fmt;

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A page could not be fetched
    #[error("Fetch error for {url}: {message}")]
    Fetch { url: String, message: String },

    /// Malformed percent encoding
    #[error("Decode error for '{input}': {message}")]
    Decode { input: String, message: String },

    /// Category rule pattern failed to compile
    #[error("Invalid pattern for rule '{name}': {message}")]
    Pattern { name: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a fetch error for a URL.
    pub fn fetch(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a decode error.
    pub fn decode(input: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Decode {
            input: input.into(),
            message: message.to_string(),
        }
    }

    /// Create a pattern compilation error.
    pub fn pattern(name: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Pattern {
            name: name.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
