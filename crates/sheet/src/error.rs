use thiserror::Error;

/// Errors that can occur while reading a sheet export
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Malformed sheet: {0}")]
    MalformedSheet(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl SheetError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedSheet(message.into())
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
