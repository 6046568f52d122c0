/// Errors from the storage layer.
///
/// The tiered store turns a remote failure into a local write where it can;
/// these variants surface only when a tier genuinely cannot serve the
/// operation.
///
/// # Examples
///
/// ```
/// use attache_store::StorageError;
///
/// let err = StorageError::Remote("connection refused".into());
/// assert!(err.to_string().contains("connection refused"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The remote store could not be reached or the transport failed.
    #[error("remote store error: {0}")]
    Remote(String),

    /// The remote store answered with a non-success status.
    #[error("remote store returned HTTP {status}: {detail}")]
    RemoteStatus {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        detail: String,
    },

    /// The local SQLite store failed.
    #[error("local store error: {0}")]
    Local(String),

    /// A record could not be serialized or a stored body deserialized.
    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No record with the given id exists.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Every configured tier failed the operation.
    #[error("all storage tiers failed: {0}")]
    Unavailable(String),
}
