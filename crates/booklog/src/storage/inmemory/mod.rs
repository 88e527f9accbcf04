//! In-memory remote store for testing.
//!
//! Behaves like the hosted table, including duplicate and missing-row
//! errors, and can be switched off to simulate an outage.
//!
//! # Example
//!
//! ```rust,ignore
//! use booklog::storage::InMemoryEntryStore;
//!
//! let remote = InMemoryEntryStore::new();
//! remote.set_available(false);
//! // Every call now fails with ConnectionFailed.
//! ```

mod repository;

pub use repository::InMemoryEntryStore;
