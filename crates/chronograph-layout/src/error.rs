//! Error types for chronograph-layout parse boundaries.
//!
//! Layout operations themselves are total and never return these; errors only
//! arise when turning host-supplied strings (identifiers, time zones, config)
//! into typed values.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Invalid privacy mode: {0}")]
    InvalidPrivacyMode(String),

    #[error("Invalid language: {0}")]
    InvalidLanguage(String),

    #[error("Invalid datetime: {0}")]
    InvalidDateTime(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
