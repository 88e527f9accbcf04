use std::path::PathBuf;
use std::{env, time::Duration};

pub const DEFAULT_TABLE: &str = "book_entries";
pub const DEFAULT_CACHE_DIR: &str = ".booklog";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_SQLITE_PATH: &str = "booklog-cache.db";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the hosted table (default: none, which means local-only)
    pub remote_url: Option<String>,
    /// API key sent with every remote request (default: empty)
    pub api_key: String,
    /// Remote table name (default: "book_entries")
    pub table: String,
    /// Directory of the file cache (default: ".booklog")
    pub cache_dir: PathBuf,
    /// Remote request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
    /// Path to the SQLite cache database (default: "booklog-cache.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    pub sqlite_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BOOKLOG_REMOTE_URL` - Hosted table base URL (default: unset)
    /// - `BOOKLOG_API_KEY` - API key (default: empty)
    /// - `BOOKLOG_TABLE` - Table name (default: "book_entries")
    /// - `BOOKLOG_CACHE_DIR` - File cache directory (default: ".booklog")
    /// - `BOOKLOG_REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 10)
    /// - `BOOKLOG_SQLITE_PATH` - SQLite cache path (default: "booklog-cache.db")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count
    /// as unset and unparsable numbers fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            remote_url: var("BOOKLOG_REMOTE_URL"),
            api_key: var("BOOKLOG_API_KEY").unwrap_or_default(),
            table: var("BOOKLOG_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            cache_dir: var("BOOKLOG_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR)),
            request_timeout_seconds: var("BOOKLOG_REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS),
            sqlite_path: var("BOOKLOG_SQLITE_PATH")
                .unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_string()),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
