use thiserror::Error;

/// Errors that can occur when validating a book entry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EntryError {
    #[error("Entry title cannot be empty")]
    EmptyTitle,
    #[error("Entry author cannot be empty")]
    EmptyAuthor,
    #[error("Unknown genre: {0}")]
    UnknownGenre(String),
    #[error("Invalid {field}: {value}")]
    InvalidCoordinate { field: &'static str, value: String },
    #[error("Time scale position out of range: ({x}, {y})")]
    DotOutOfRange { x: f64, y: f64 },
}
