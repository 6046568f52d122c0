//! HTTP client for the hosted document store.
//!
//! The wire protocol is a minimal JSON-over-REST document API:
//! `POST /collections/{name}/documents` to create,
//! `GET /collections/{name}/documents` to list, and
//! `DELETE /collections/{name}/documents/{id}` to remove.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use attache_core::{Record, RecordKind};

use crate::error::StorageError;
use crate::{Ack, RecordStore, StoreTier, StoredRecord};

/// Client for the remote document store.
///
/// # Examples
///
/// ```
/// use attache_store::RemoteStore;
///
/// let store = RemoteStore::new("https://docs.example.com/v1", None);
/// assert_eq!(store.base_url(), "https://docs.example.com/v1");
/// ```
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for RemoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteStore")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct WriteResponse {
    id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentDto {
    id: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    document: serde_json::Value,
}

impl RemoteStore {
    /// Create a client for the store at `base_url`.
    ///
    /// The API key, when present, is sent as a bearer token.
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    /// The configured base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn documents_url(&self, collection: &str) -> String {
        format!("{}/collections/{collection}/documents", self.base_url)
    }

    fn with_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => req.bearer_auth(key),
            None => req,
        }
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, StorageError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let detail = resp
            .text()
            .await
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());
        Err(StorageError::RemoteStatus {
            status: status.as_u16(),
            detail,
        })
    }
}

impl RecordStore for RemoteStore {
    async fn write(&self, record: &Record) -> Result<Ack, StorageError> {
        let resp = self
            .with_auth(self.client.post(self.documents_url(record.collection())))
            .json(record)
            .send()
            .await
            .map_err(|e| StorageError::Remote(e.to_string()))?;
        let resp = Self::check(resp).await?;
        let body: WriteResponse = resp
            .json()
            .await
            .map_err(|e| StorageError::Remote(format!("bad write response: {e}")))?;
        Ok(Ack {
            id: body.id,
            tier: StoreTier::Remote,
        })
    }

    async fn list(&self, kind: RecordKind) -> Result<Vec<StoredRecord>, StorageError> {
        let resp = self
            .with_auth(self.client.get(self.documents_url(kind.collection())))
            .send()
            .await
            .map_err(|e| StorageError::Remote(e.to_string()))?;
        let resp = Self::check(resp).await?;
        let docs: Vec<DocumentDto> = resp
            .json()
            .await
            .map_err(|e| StorageError::Remote(format!("bad list response: {e}")))?;
        Ok(docs
            .into_iter()
            .map(|doc| StoredRecord {
                id: doc.id,
                collection: kind.collection().to_string(),
                body: doc.document,
                created_at: doc.created_at.unwrap_or_else(Utc::now),
            })
            .collect())
    }

    async fn delete(&self, kind: RecordKind, id: &str) -> Result<(), StorageError> {
        let url = format!("{}/{id}", self.documents_url(kind.collection()));
        let resp = self
            .with_auth(self.client.delete(url))
            .send()
            .await
            .map_err(|e| StorageError::Remote(e.to_string()))?;
        if resp.status().as_u16() == 404 {
            return Err(StorageError::NotFound(id.to_string()));
        }
        Self::check(resp).await?;
        Ok(())
    }
}
