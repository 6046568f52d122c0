//! Remote-first store with typed local fallback.

use attache_core::{Record, RecordKind, StorageConfig};

use crate::error::StorageError;
use crate::local::LocalStore;
use crate::remote::RemoteStore;
use crate::{Ack, RecordStore, StoredRecord};

/// Primary remote store with a local fallback tier.
///
/// With no remote configured the local store serves everything. With a
/// remote configured, writes and reads go remote-first; a remote failure
/// falls through to the local tier, and the [`Ack`] tier field tells the
/// caller which tier absorbed a write. Only when both tiers fail does an
/// operation error, with [`StorageError::Unavailable`].
///
/// # Examples
///
/// ```
/// use attache_store::{LocalStore, TieredStore};
///
/// let store = TieredStore::new(None, LocalStore::in_memory().unwrap());
/// assert!(!store.has_remote());
/// ```
pub struct TieredStore {
    remote: Option<RemoteStore>,
    local: LocalStore,
}

impl TieredStore {
    /// Compose a tiered store from an optional remote and a local store.
    pub fn new(remote: Option<RemoteStore>, local: LocalStore) -> Self {
        Self { remote, local }
    }

    /// Build from the `[storage]` config section: remote client when a URL
    /// is configured, local database at the configured path.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Local`] if the local database cannot be
    /// opened.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use attache_core::StorageConfig;
    /// use attache_store::TieredStore;
    ///
    /// let store = TieredStore::from_config(&StorageConfig::default()).unwrap();
    /// ```
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let remote = config
            .remote_url
            .as_deref()
            .map(|url| RemoteStore::new(url, config.api_key.as_deref()));
        let local = LocalStore::open(&config.local_path)?;
        Ok(Self { remote, local })
    }

    /// Whether a remote tier is configured.
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }
}

impl RecordStore for TieredStore {
    async fn write(&self, record: &Record) -> Result<Ack, StorageError> {
        let remote_err = match &self.remote {
            Some(remote) => match remote.write(record).await {
                Ok(ack) => return Ok(ack),
                Err(e) => Some(e),
            },
            None => None,
        };
        match (self.local.write(record).await, remote_err) {
            (Ok(ack), _) => Ok(ack),
            (Err(local_err), Some(remote_err)) => Err(StorageError::Unavailable(format!(
                "remote: {remote_err}; local: {local_err}"
            ))),
            (Err(local_err), None) => Err(local_err),
        }
    }

    async fn list(&self, kind: RecordKind) -> Result<Vec<StoredRecord>, StorageError> {
        if let Some(remote) = &self.remote {
            match remote.list(kind).await {
                Ok(records) => return Ok(records),
                Err(remote_err) => {
                    return self.local.list(kind).await.map_err(|local_err| {
                        StorageError::Unavailable(format!(
                            "remote: {remote_err}; local: {local_err}"
                        ))
                    });
                }
            }
        }
        self.local.list(kind).await
    }

    async fn delete(&self, kind: RecordKind, id: &str) -> Result<(), StorageError> {
        if let Some(remote) = &self.remote {
            match remote.delete(kind, id).await {
                Ok(()) => return Ok(()),
                // The record may only exist locally (an earlier fallback
                // write); NotFound falls through to the local tier too.
                Err(StorageError::NotFound(_)) | Err(StorageError::Remote(_)) => {}
                Err(other) => return Err(other),
            }
        }
        self.local.delete(kind, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreTier;
    use attache_core::ContactMessage;

    fn message(text: &str) -> Record {
        Record::Message(ContactMessage::new("Ada", "ada@example.com", text).unwrap())
    }

    fn unreachable_remote() -> RemoteStore {
        // Port 9 (discard) refuses connections on loopback.
        RemoteStore::new("http://127.0.0.1:9", None)
    }

    #[tokio::test]
    async fn local_only_write_acks_local_tier() {
        let store = TieredStore::new(None, LocalStore::in_memory().unwrap());
        let ack = store.write(&message("hi")).await.unwrap();
        assert_eq!(ack.tier, StoreTier::Local);
    }

    #[tokio::test]
    async fn failed_remote_write_falls_back_to_local() {
        let store = TieredStore::new(Some(unreachable_remote()), LocalStore::in_memory().unwrap());
        let ack = store.write(&message("hi")).await.unwrap();
        assert_eq!(ack.tier, StoreTier::Local);

        // The fallback write is readable through the same interface.
        let records = store.list(RecordKind::Message).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].body["message"], "hi");
    }

    #[tokio::test]
    async fn failed_remote_list_falls_back_to_local() {
        let store = TieredStore::new(Some(unreachable_remote()), LocalStore::in_memory().unwrap());
        assert!(store.list(RecordKind::Request).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_remote_delete_falls_back_to_local() {
        let store = TieredStore::new(Some(unreachable_remote()), LocalStore::in_memory().unwrap());
        let ack = store.write(&message("bye")).await.unwrap();
        store.delete(RecordKind::Message, &ack.id).await.unwrap();
        assert!(store.list(RecordKind::Message).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_everywhere_is_not_found() {
        let store = TieredStore::new(None, LocalStore::in_memory().unwrap());
        let err = store.delete(RecordKind::Message, "42").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }
}
