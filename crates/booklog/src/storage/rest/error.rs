//! Maps HTTP failures to `RepositoryError`.

use booklog_core::storage::RepositoryError;
use serde::Deserialize;

/// Transport failures: the request never got an answer.
pub fn map_reqwest_error(err: reqwest::Error) -> RepositoryError {
    if err.is_decode() {
        RepositoryError::Serialization(err.to_string())
    } else {
        RepositoryError::ConnectionFailed(err.to_string())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Builds the error for a non-2xx answer.
///
/// PostgREST error bodies are `{"message": ...}`; anything else is kept
/// verbatim.
pub fn map_status(status: u16, body: &str, entity_type: &'static str, id: &str) -> RepositoryError {
    if status == 404 {
        return RepositoryError::NotFound {
            entity_type,
            id: id.to_string(),
        };
    }

    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
        Err(_) => body.to_string(),
    };
    RepositoryError::Rejected { status, message }
}
