//! Two-tier record storage: a primary remote document store with a local
//! SQLite fallback behind one interface.
//!
//! The fallback is an explicit, typed path rather than a silent catch:
//! every write returns an [`Ack`] naming the tier that absorbed it, and
//! every failure is a [`StorageError`] variant.
//!
//! - [`RecordStore`]: the `write` / `list` / `delete` contract
//! - [`RemoteStore`]: HTTP document-store client
//! - [`LocalStore`]: SQLite-backed fallback store
//! - [`TieredStore`]: remote-first composition of the two

mod error;
mod local;
mod remote;
mod tiered;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use attache_core::{Record, RecordKind};

pub use error::StorageError;
pub use local::LocalStore;
pub use remote::RemoteStore;
pub use tiered::TieredStore;

/// Acknowledgement of a successful write.
///
/// # Examples
///
/// ```
/// use attache_store::{Ack, StoreTier};
///
/// let ack = Ack { id: "17".into(), tier: StoreTier::Local };
/// assert_eq!(format!("{}", ack.tier), "local");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ack {
    /// Store-assigned record id.
    pub id: String,
    /// Tier that absorbed the write.
    pub tier: StoreTier,
}

/// Which storage tier handled an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreTier {
    /// The primary remote document store.
    Remote,
    /// The local SQLite store, either as primary (no remote configured) or
    /// as fallback after a remote failure.
    Local,
}

impl std::fmt::Display for StoreTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreTier::Remote => write!(f, "remote"),
            StoreTier::Local => write!(f, "local"),
        }
    }
}

/// A record as it exists in a store: id and timestamp are store-assigned,
/// the body is the validated [`Record`] as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    /// Store-assigned id.
    pub id: String,
    /// Collection the record lives in.
    pub collection: String,
    /// The record body as JSON.
    pub body: serde_json::Value,
    /// Store-assigned creation time (UTC).
    pub created_at: DateTime<Utc>,
}

/// The storage contract shared by all tiers.
///
/// Callers never fabricate ids or timestamps; the store assigns both.
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    /// Persist a validated record, returning the assigned id and tier.
    async fn write(&self, record: &Record) -> Result<Ack, StorageError>;

    /// List all records of one kind, oldest first.
    async fn list(&self, kind: RecordKind) -> Result<Vec<StoredRecord>, StorageError>;

    /// Delete one record by id.
    async fn delete(&self, kind: RecordKind, id: &str) -> Result<(), StorageError>;
}
