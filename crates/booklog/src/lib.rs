//! booklog - keep a log of the books you read.
//!
//! The imperative shell around `booklog_core`: store backends, the sync
//! layer, the `Library` controller and the CLI.

pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod library;
pub mod output;
pub mod storage;
pub mod sync;

pub use library::{Library, LibraryError};
pub use sync::SyncedEntryStore;
