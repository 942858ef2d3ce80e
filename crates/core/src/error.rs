//! Error types for citysheet.

use citysheet_sheet::SheetError;
use thiserror::Error;

/// Result type for citysheet operations.
pub type CityResult<T> = Result<T, CityError>;

/// Errors that abort initialization or end a session.
#[derive(Debug, Error)]
pub enum CityError {
    /// The document could not be fetched, read or decoded.
    #[error("Load failure: {0}")]
    LoadFailure(String),

    /// The document decoded but does not have the sheet shape.
    #[error("Malformed sheet: {0}")]
    MalformedSheet(String),

    /// The session task is no longer running.
    #[error("Session closed")]
    SessionClosed,
}

impl CityError {
    /// Create a load failure.
    pub fn load(message: impl Into<String>) -> Self {
        Self::LoadFailure(message.into())
    }
}

impl From<SheetError> for CityError {
    fn from(err: SheetError) -> Self {
        match err {
            SheetError::MalformedSheet(message) => Self::MalformedSheet(message),
            SheetError::Parse(message) => Self::LoadFailure(message),
        }
    }
}

impl From<std::io::Error> for CityError {
    fn from(err: std::io::Error) -> Self {
        Self::LoadFailure(err.to_string())
    }
}

impl From<reqwest::Error> for CityError {
    fn from(err: reqwest::Error) -> Self {
        Self::LoadFailure(err.to_string())
    }
}
