use serde::Serialize;

/// Where the entries returned by a read came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadSource {
    /// Fetched from the remote store; the cache now mirrors it.
    Remote,
    /// The remote failed or was empty; these are the cached entries.
    Cache,
}

/// What a create, update or delete actually touched.
///
/// The write itself never fails from the caller's point of view, so this
/// is informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    /// The remote store accepted the write.
    pub remote_applied: bool,
    /// The cached collection changed and was written back.
    pub cache_changed: bool,
}

/// Result of copying cache-only entries up to the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "inserted")]
pub enum MigrationOutcome {
    /// The cache was empty.
    NothingLocal,
    /// Every cached entry already exists remotely.
    UpToDate,
    /// This many entries were inserted.
    Inserted(usize),
    /// A step failed; nothing more was attempted.
    Aborted,
}

impl MigrationOutcome {
    /// Number of entries inserted remotely.
    pub fn inserted(&self) -> usize {
        match self {
            MigrationOutcome::Inserted(n) => *n,
            _ => 0,
        }
    }
}
