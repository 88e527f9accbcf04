//! Remote entry store backends.
//!
//! Concrete implementations of `booklog_core::storage::RemoteEntryStore`:
//!
//! - [`RestEntryStore`]: the hosted table, over HTTP
//! - [`InMemoryEntryStore`]: a process-local table for tests and demos
//! - [`OfflineStore`]: no remote at all; every call fails

pub mod inmemory;
mod offline;
pub mod rest;

pub use inmemory::InMemoryEntryStore;
pub use offline::OfflineStore;
pub use rest::RestEntryStore;
