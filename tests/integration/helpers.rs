//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use bytes::Bytes;

use mediadesk_blob::providers::MemoryBlobStore;
use mediadesk_core::config::AppConfig;
use mediadesk_core::config::kv::KvConfig;
use mediadesk_core::traits::blob::{BlobUpload, FileRecord};
use mediadesk_core::traits::kv::KeyValueStore;
use mediadesk_core::types::{FileId, FolderId};
use mediadesk_entity::folder::Folder;
use mediadesk_kv::memory::MemoryKvStore;
use mediadesk_kv::{KeySpace, KvManager};
use mediadesk_service::{CreateFolderRequest, ServiceContext};

/// Test application context
pub struct TestApp {
    /// Every service, wired over the stores below
    pub ctx: ServiceContext,
    /// The Blob Store, for seeding and failure injection
    pub blobs: MemoryBlobStore,
    /// The raw key-value store, for seeding corrupted data
    pub kv: Arc<dyn KeyValueStore>,
    /// Keys the services use
    pub keys: KeySpace,
}

impl TestApp {
    /// Create a test application with empty in-memory stores
    pub fn new() -> Self {
        Self::with_files(Vec::new())
    }

    /// Create a test application whose Blob Store already holds `files`
    pub fn with_files(files: Vec<FileRecord>) -> Self {
        Self::build(Arc::new(MemoryKvStore::new()), MemoryBlobStore::with_files(files))
    }

    /// Create a test application over a file-backed key-value store
    pub async fn on_disk(data_dir: &str, blobs: MemoryBlobStore) -> Self {
        let config = KvConfig {
            provider: "file".to_string(),
            file: mediadesk_core::config::kv::FileKvConfig {
                data_dir: data_dir.to_string(),
            },
            ..KvConfig::default()
        };
        let kv = KvManager::new(&config)
            .await
            .expect("Failed to open file key-value store");
        Self::build(kv.store(), blobs)
    }

    fn build(kv: Arc<dyn KeyValueStore>, blobs: MemoryBlobStore) -> Self {
        let config = AppConfig::default();
        let keys = KeySpace::default();
        let ctx = ServiceContext::new(
            Arc::clone(&kv),
            &keys,
            Arc::new(blobs.clone()),
            &config.listing,
            &config.tree,
        );
        Self {
            ctx,
            blobs,
            kv,
            keys,
        }
    }

    /// Create a folder through the service layer
    pub async fn folder(&self, name: &str, parent_id: Option<FolderId>) -> Folder {
        self.ctx
            .folders
            .create_folder(CreateFolderRequest {
                parent_id,
                name: name.to_string(),
            })
            .await
            .expect("Failed to create folder")
    }

    /// Assign files to a folder
    pub async fn place(&self, ids: &[&str], folder: Option<FolderId>) {
        let ids: Vec<FileId> = ids.iter().map(|id| FileId::from(*id)).collect();
        self.ctx
            .overlays
            .assign(&ids, folder)
            .await
            .expect("Failed to assign files");
    }

    /// Overwrite the persisted folder collection
    pub async fn seed_folders(&self, folders: &[Folder]) {
        let json = serde_json::to_string(folders).expect("Failed to serialize folders");
        self.kv
            .set(&self.keys.folders(), &json)
            .await
            .expect("Failed to seed folders");
    }
}

/// A Blob Store record
pub fn record(id: &str, name: &str) -> FileRecord {
    FileRecord {
        id: FileId::from(id),
        name: name.to_string(),
        original_name: Some(name.to_string()),
        mime_type: Some("application/octet-stream".to_string()),
        size: 128,
        url: format!("https://cdn.example.com/{id}"),
        updated_at: None,
    }
}

/// An upload payload
pub fn upload(name: &str) -> BlobUpload {
    BlobUpload {
        name: name.to_string(),
        mime_type: Some("text/plain".to_string()),
        data: Bytes::from(format!("contents of {name}")),
    }
}
