//! SQL for the slot table.

pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS slots (
    key TEXT PRIMARY KEY NOT NULL,
    value BLOB NOT NULL
);
"#;

pub const SELECT_SLOT: &str = "SELECT value FROM slots WHERE key = ?1";

pub const UPSERT_SLOT: &str = r#"
INSERT INTO slots (key, value) VALUES (?1, ?2)
ON CONFLICT(key) DO UPDATE SET value = excluded.value
"#;

pub const DELETE_SLOT: &str = "DELETE FROM slots WHERE key = ?1";
