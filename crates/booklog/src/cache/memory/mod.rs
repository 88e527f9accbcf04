//! In-memory cache backend.
//!
//! Nothing survives the process; useful for tests and throwaway runs.

mod cache;

pub use cache::MemoryCache;
