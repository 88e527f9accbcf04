//! booklog_core - the functional core of the booklog project.
//!
//! Everything in this crate is pure: domain types, validation, derived
//! views, the storage and cache traits, and the sync policy. The I/O lives
//! in the `booklog` crate.

pub mod book;
pub mod cache;
pub mod serde;
pub mod storage;
pub mod sync;
