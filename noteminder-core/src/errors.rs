use crate::NoteId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("invalid data format: {0}")]
    Format(String),
    #[error("storage error: {0}")]
    Io(String),
    #[error("note not found: {0}")]
    NotFound(NoteId),
    #[error("no note selected")]
    InvalidState,
    #[error("nothing to review")]
    EmptyCollection,
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Io(e.to_string())
    }
}
