//! Errors raised by backends.
//!
//! None of these escape [`ThemeController`](crate::controller::ThemeController):
//! it logs them at debug level and falls back to the documented default.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("persistent storage is not available")]
    StorageUnavailable,

    #[error("storage access failed: {0}")]
    Storage(String),

    #[error("document access failed: {0}")]
    Dom(String),

    #[error("invalid theme configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse theme configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ThemeError>;
