// Error types for the nota CLI.
// Covers Notion API errors, cache I/O errors, and name resolution failures.

use thiserror::Error;

use crate::notion::types::ObjectKind;

#[derive(Error, Debug)]
pub enum NotaError {
    #[error("Notion API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, retry after {retry_after}")]
    RateLimited { retry_after: String },

    #[error("Missing NOTION_API_KEY environment variable")]
    MissingToken,

    #[error("Could not find {kind} '{name}'")]
    Unresolved { name: String, kind: ObjectKind },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, NotaError>;
