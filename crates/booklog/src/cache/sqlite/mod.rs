//! SQLite cache backend.
//!
//! Slots are rows of a single key/value table accessed through
//! `tokio-rusqlite`, which runs every query on a dedicated thread.

mod cache;
mod error;
mod schema;

pub use cache::SqliteCache;
