use thiserror::Error;

/// Errors that can occur when talking to the remote entry store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Remote rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Returns true if the store could not be reached at all, as opposed
    /// to having answered with an error.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, RepositoryError::ConnectionFailed(_))
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
