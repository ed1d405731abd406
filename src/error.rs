//! Error types for Tavle.

use thiserror::Error;

/// Library-level error type for Tavle operations.
#[derive(Error, Debug)]
pub enum TavleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("Classification failed: {0}")]
    Classification(String),

    #[error("Notion sync failed: {0}")]
    Notion(String),

    #[error("Dropbox upload failed: {0}")]
    Dropbox(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Tavle operations.
pub type Result<T> = std::result::Result<T, TavleError>;
