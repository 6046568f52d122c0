//! SQLite-backed local store, used standalone or as the fallback tier.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use attache_core::{Record, RecordKind};

use crate::error::StorageError;
use crate::{Ack, RecordStore, StoreTier, StoredRecord};

/// Local record store on SQLite.
///
/// # Examples
///
/// ```
/// use attache_store::LocalStore;
///
/// let store = LocalStore::in_memory().unwrap();
/// ```
pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    /// Open or create a database at the given path.
    ///
    /// Creates parent directories and the schema if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Local`] if the database cannot be opened.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use attache_store::LocalStore;
    ///
    /// let store = LocalStore::open(Path::new(".attache/records.db")).unwrap();
    /// ```
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StorageError::Local(format!("failed to create store directory: {e}"))
                })?;
            }
        }
        let conn = Connection::open(path)
            .map_err(|e| StorageError::Local(format!("failed to open database: {e}")))?;

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Local`] if schema creation fails.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Local(format!("failed to create in-memory database: {e}")))?;

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS records (
                    id         INTEGER PRIMARY KEY AUTOINCREMENT,
                    collection TEXT NOT NULL,
                    body       TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );
                CREATE INDEX IF NOT EXISTS idx_records_collection
                    ON records(collection);",
            )
            .map_err(|e| StorageError::Local(format!("failed to create schema: {e}")))
    }

    fn write_sync(&self, record: &Record) -> Result<Ack, StorageError> {
        let body = serde_json::to_string(record)?;
        let created_at = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO records (collection, body, created_at) VALUES (?1, ?2, ?3)",
                params![record.collection(), body, created_at],
            )
            .map_err(|e| StorageError::Local(format!("insert failed: {e}")))?;
        Ok(Ack {
            id: self.conn.last_insert_rowid().to_string(),
            tier: StoreTier::Local,
        })
    }

    fn list_sync(&self, kind: RecordKind) -> Result<Vec<StoredRecord>, StorageError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, collection, body, created_at FROM records
                 WHERE collection = ?1 ORDER BY id",
            )
            .map_err(|e| StorageError::Local(format!("query failed: {e}")))?;

        let rows = stmt
            .query_map(params![kind.collection()], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .map_err(|e| StorageError::Local(format!("query failed: {e}")))?;

        let mut records = Vec::new();
        for row in rows {
            let (id, collection, body, created_at) =
                row.map_err(|e| StorageError::Local(format!("row read failed: {e}")))?;
            let created_at = DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| StorageError::Local(format!("bad timestamp in store: {e}")))?
                .with_timezone(&Utc);
            records.push(StoredRecord {
                id: id.to_string(),
                collection,
                body: serde_json::from_str(&body)?,
                created_at,
            });
        }
        Ok(records)
    }

    fn delete_sync(&self, kind: RecordKind, id: &str) -> Result<(), StorageError> {
        let rowid: i64 = id
            .parse()
            .map_err(|_| StorageError::NotFound(id.to_string()))?;
        let affected = self
            .conn
            .execute(
                "DELETE FROM records WHERE id = ?1 AND collection = ?2",
                params![rowid, kind.collection()],
            )
            .map_err(|e| StorageError::Local(format!("delete failed: {e}")))?;
        if affected == 0 {
            return Err(StorageError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

impl RecordStore for LocalStore {
    async fn write(&self, record: &Record) -> Result<Ack, StorageError> {
        self.write_sync(record)
    }

    async fn list(&self, kind: RecordKind) -> Result<Vec<StoredRecord>, StorageError> {
        self.list_sync(kind)
    }

    async fn delete(&self, kind: RecordKind, id: &str) -> Result<(), StorageError> {
        self.delete_sync(kind, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attache_core::ContactMessage;

    fn message(text: &str) -> Record {
        Record::Message(ContactMessage::new("Ada", "ada@example.com", text).unwrap())
    }

    #[tokio::test]
    async fn write_then_list_round_trips() {
        let store = LocalStore::in_memory().unwrap();
        let ack = store.write(&message("hello")).await.unwrap();
        assert_eq!(ack.tier, StoreTier::Local);

        let records = store.list(RecordKind::Message).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, ack.id);
        assert_eq!(records[0].collection, "messages");
        assert_eq!(records[0].body["message"], "hello");
    }

    #[tokio::test]
    async fn list_filters_by_collection() {
        let store = LocalStore::in_memory().unwrap();
        store.write(&message("a")).await.unwrap();
        assert!(store.list(RecordKind::Donor).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_returns_oldest_first() {
        let store = LocalStore::in_memory().unwrap();
        store.write(&message("first")).await.unwrap();
        store.write(&message("second")).await.unwrap();
        let records = store.list(RecordKind::Message).await.unwrap();
        assert_eq!(records[0].body["message"], "first");
        assert_eq!(records[1].body["message"], "second");
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let store = LocalStore::in_memory().unwrap();
        let ack = store.write(&message("bye")).await.unwrap();
        store.delete(RecordKind::Message, &ack.id).await.unwrap();
        assert!(store.list(RecordKind::Message).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_id_is_not_found() {
        let store = LocalStore::in_memory().unwrap();
        let err = store.delete(RecordKind::Message, "999").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));

        let err = store
            .delete(RecordKind::Message, "not-a-rowid")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_respects_collection() {
        let store = LocalStore::in_memory().unwrap();
        let ack = store.write(&message("keep")).await.unwrap();
        let err = store.delete(RecordKind::Donor, &ack.id).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
        assert_eq!(store.list(RecordKind::Message).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn open_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.db");
        {
            let store = LocalStore::open(&path).unwrap();
            store.write(&message("durable")).await.unwrap();
        }
        let store = LocalStore::open(&path).unwrap();
        assert_eq!(store.list(RecordKind::Message).await.unwrap().len(), 1);
    }
}
