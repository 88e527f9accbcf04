//! How the local cache and the remote store are kept in step.
//!
//! The shell performs the I/O; this module decides what the cache should
//! look like after each operation.

mod outcome;
mod policy;

pub use outcome::{MigrationOutcome, ReadSource, SyncOutcome};
pub use policy::{
    append_entry, entries_missing_remotely, merge_update, remove_entry, ConsistencyPolicy,
};
