//! Maps `tokio_rusqlite::Error` to `CacheError`.

use booklog_core::cache::CacheError;

/// Wraps rusqlite errors for `tokio_rusqlite` closures.
pub fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// - `CannotOpen` and a closed connection → `CacheError::Unavailable`
/// - everything else → `CacheError::OperationFailed`
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error) -> CacheError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(sqlite_err, _))
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            CacheError::Unavailable(format!("Cannot open database: {err}"))
        }
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            CacheError::Unavailable("Connection closed unexpectedly".to_string())
        }
        _ => CacheError::OperationFailed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cannot_open_maps_to_unavailable() {
        let sqlite_err = rusqlite::ffi::Error {
            code: rusqlite::ErrorCode::CannotOpen,
            extended_code: rusqlite::ffi::SQLITE_CANTOPEN,
        };
        let err = wrap_err(rusqlite::Error::SqliteFailure(sqlite_err, None));

        assert!(matches!(
            map_tokio_rusqlite_error(err),
            CacheError::Unavailable(_)
        ));
    }

    #[test]
    fn test_connection_closed_maps_to_unavailable() {
        assert_eq!(
            map_tokio_rusqlite_error(tokio_rusqlite::Error::ConnectionClosed),
            CacheError::Unavailable("Connection closed unexpectedly".to_string())
        );
    }

    #[test]
    fn test_other_errors_map_to_operation_failed() {
        let err = wrap_err(rusqlite::Error::InvalidQuery);
        assert!(matches!(
            map_tokio_rusqlite_error(err),
            CacheError::OperationFailed(_)
        ));
    }
}
