//! Error types for sqlweave.

use thiserror::Error;

/// The main error type for rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The caller or its metadata broke a rendering precondition
    /// (identity requested without an identity field, empty primary key, ...).
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// No dialect mapping and no generic fallback exist for a construct.
    #[error("Unsupported construct for {dialect}: {construct}")]
    Unsupported {
        dialect: &'static str,
        construct: String,
    },

    /// A pagination template could not be parsed.
    #[error("Invalid template '{template}': {message}")]
    InvalidTemplate { template: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RenderError {
    /// Create a contract violation error.
    pub fn contract(message: impl Into<String>) -> Self {
        Self::ContractViolation(message.into())
    }

    /// Create an unsupported-construct error for the given dialect.
    pub fn unsupported(dialect: &'static str, construct: impl Into<String>) -> Self {
        Self::Unsupported {
            dialect,
            construct: construct.into(),
        }
    }

    /// Create an invalid template error.
    pub fn template(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            template: template.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
