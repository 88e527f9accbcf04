use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use booklog_core::cache::{is_valid_key, Cache, CacheError, Result};

/// Stores slot `key` at `<dir>/<key>.json`.
///
/// The directory is created on first write. Writes land in a sibling
/// temporary file that is then renamed over the slot, so a crash never
/// leaves a half-written slot behind.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf> {
        if !is_valid_key(key) {
            return Err(CacheError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl Cache for FileCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.slot_path(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.slot_path(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;

        tracing::trace!(path = %path.display(), bytes = value.len(), "Cache slot written");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_reads_as_absent() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());

        assert_eq!(cache.get("bookEntries").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_creates_directory_and_file() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path().join("nested"));

        cache.set("bookEntries", b"[]").await.unwrap();

        let on_disk = std::fs::read(dir.path().join("nested/bookEntries.json")).unwrap();
        assert_eq!(on_disk, b"[]");
        assert_eq!(cache.get("bookEntries").await.unwrap(), Some(b"[]".to_vec()));
    }

    #[tokio::test]
    async fn test_set_replaces_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());

        cache.set("slot", b"first").await.unwrap();
        cache.set("slot", b"second").await.unwrap();

        assert_eq!(cache.get("slot").await.unwrap(), Some(b"second".to_vec()));
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["slot.json".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());

        cache.set("slot", b"x").await.unwrap();
        cache.delete("slot").await.unwrap();
        cache.delete("slot").await.unwrap();

        assert_eq!(cache.get("slot").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());

        assert!(matches!(
            cache.get("../etc/passwd").await,
            Err(CacheError::InvalidKey(_))
        ));
        assert!(matches!(
            cache.set("a/b", b"x").await,
            Err(CacheError::InvalidKey(_))
        ));
    }

    #[tokio::test]
    async fn test_unreadable_slot_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("slot.json")).unwrap();
        let cache = FileCache::new(dir.path());

        assert!(matches!(
            cache.get("slot").await,
            Err(CacheError::OperationFailed(_))
        ));
    }
}
