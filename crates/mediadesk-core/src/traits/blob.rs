//! Blob Store trait for the flat, non-hierarchical file storage API.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::id::FileId;
use crate::types::pagination::{PageRequest, Pagination};

/// A file as reported by the Blob Store. Read-only to MediaDesk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Remote identifier.
    pub id: FileId,
    /// Stored file name.
    pub name: String,
    /// Name of the file as it was uploaded.
    #[serde(default)]
    pub original_name: Option<String>,
    /// MIME type.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Public URL of the blob.
    #[serde(default)]
    pub url: String,
    /// Last modification time reported by the store.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl FileRecord {
    /// The name to show when no local override exists.
    pub fn remote_name(&self) -> &str {
        self.original_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.name)
    }
}

/// Parameters for [`BlobStore::list`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlobListParams {
    /// Page to fetch.
    #[serde(flatten)]
    pub page: PageRequest,
    /// Optional server-side name search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl BlobListParams {
    /// Parameters for a plain page fetch.
    pub fn page(page: PageRequest) -> Self {
        Self { page, search: None }
    }
}

/// One page of Blob Store results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobPage {
    /// Files on this page.
    pub files: Vec<FileRecord>,
    /// Pagination metadata.
    pub pagination: Pagination,
}

/// A file to upload.
#[derive(Debug, Clone)]
pub struct BlobUpload {
    /// File name to store.
    pub name: String,
    /// MIME type, if known.
    pub mime_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

/// Trait for Blob Store clients.
///
/// The store knows nothing about folders: it lists, uploads, and deletes
/// flat records only.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "memory", "http").
    fn provider_type(&self) -> &str;

    /// List one page of files.
    async fn list(&self, params: &BlobListParams) -> AppResult<BlobPage>;

    /// Upload files and return the records the store created.
    async fn upload(&self, files: Vec<BlobUpload>) -> AppResult<Vec<FileRecord>>;

    /// Delete a file by id.
    async fn delete(&self, id: &FileId) -> AppResult<()>;

    /// Check whether the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
