//! File-backed cache.
//!
//! Each slot is one JSON file under a cache directory, so the collection
//! survives restarts the way browser local storage does.

mod cache;

pub use cache::FileCache;
