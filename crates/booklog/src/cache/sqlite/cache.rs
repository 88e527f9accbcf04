use async_trait::async_trait;
use tokio_rusqlite::Connection;

use booklog_core::cache::{is_valid_key, Cache, CacheError, Result};

use super::error::{map_tokio_rusqlite_error, wrap_err};
use super::schema;

/// SQLite-based cache implementation.
pub struct SqliteCache {
    conn: Connection,
}

impl SqliteCache {
    /// Opens (or creates) the database file and its schema.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// In-memory database; slots are lost when the cache is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(map_tokio_rusqlite_error)
    }
}

#[async_trait]
impl Cache for SqliteCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let key = key.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_SLOT).map_err(wrap_err)?;
                match stmt.query_row([&key], |row| row.get::<_, Vec<u8>>(0)) {
                    Ok(value) => Ok(Some(value)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        if !is_valid_key(key) {
            return Err(CacheError::InvalidKey(key.to_string()));
        }
        let key = key.to_string();
        let value = value.to_vec();

        self.conn
            .call(move |conn| {
                conn.execute(schema::UPSERT_SLOT, rusqlite::params![key, value])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let key = key.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(schema::DELETE_SLOT, [&key]).map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = SqliteCache::new_in_memory().await.unwrap();

        assert_eq!(cache.get("bookEntries").await.unwrap(), None);

        cache.set("bookEntries", b"[1]").await.unwrap();
        cache.set("bookEntries", b"[2]").await.unwrap();
        assert_eq!(
            cache.get("bookEntries").await.unwrap(),
            Some(b"[2]".to_vec())
        );

        cache.delete("bookEntries").await.unwrap();
        assert_eq!(cache.get("bookEntries").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_slots_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.db");
        let path = path.to_str().unwrap();

        {
            let cache = SqliteCache::new(path).await.unwrap();
            cache.set("slot", b"kept").await.unwrap();
        }

        let cache = SqliteCache::new(path).await.unwrap();
        assert_eq!(cache.get("slot").await.unwrap(), Some(b"kept".to_vec()));
    }

    #[tokio::test]
    async fn test_rejects_invalid_key() {
        let cache = SqliteCache::new_in_memory().await.unwrap();
        assert!(matches!(
            cache.set("no spaces", b"x").await,
            Err(CacheError::InvalidKey(_))
        ));
    }
}
