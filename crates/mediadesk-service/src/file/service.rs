//! File operations: placement, renames, uploads, and deletion.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use mediadesk_core::error::AppError;
use mediadesk_core::result::AppResult;
use mediadesk_core::traits::blob::{BlobStore, BlobUpload, FileRecord};
use mediadesk_core::types::{FileId, FolderId};

use crate::folder::FolderStore;
use crate::overlay::OverlayStore;

/// Handles file operations. Placement and names are local overlays; only
/// uploads and deletes reach the Blob Store.
#[derive(Debug, Clone)]
pub struct FileService {
    /// Blob Store client.
    blobs: Arc<dyn BlobStore>,
    /// Folder collection (for target lookups).
    folders: Arc<FolderStore>,
    /// File overlays.
    overlays: Arc<OverlayStore>,
}

/// Data for moving files to a different folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFilesRequest {
    /// Files to move.
    pub file_ids: Vec<FileId>,
    /// Target folder ID (`None` moves to root).
    #[serde(default)]
    pub target_folder_id: Option<FolderId>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        blobs: Arc<dyn BlobStore>,
        folders: Arc<FolderStore>,
        overlays: Arc<OverlayStore>,
    ) -> Self {
        Self {
            blobs,
            folders,
            overlays,
        }
    }

    /// Moves files into a folder.
    pub async fn move_files(&self, req: MoveFilesRequest) -> AppResult<()> {
        if req.file_ids.is_empty() {
            return Err(AppError::validation("No files selected"));
        }
        self.ensure_folder(req.target_folder_id).await?;
        self.overlays
            .assign(&req.file_ids, req.target_folder_id)
            .await
    }

    /// Sets the display name of a file. The remote name is untouched.
    pub async fn rename_file(&self, file_id: &FileId, name: &str) -> AppResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }
        self.overlays.rename(file_id, name).await?;

        info!(file_id = %file_id, name, "File renamed");
        Ok(())
    }

    /// Uploads files and places them in `folder_id`.
    pub async fn upload(
        &self,
        files: Vec<BlobUpload>,
        folder_id: Option<FolderId>,
    ) -> AppResult<Vec<FileRecord>> {
        if files.is_empty() {
            return Err(AppError::validation("No files to upload"));
        }
        if let Some(bad) = files.iter().find(|f| f.name.trim().is_empty()) {
            return Err(AppError::validation(format!(
                "Upload of {} bytes has no file name",
                bad.data.len()
            )));
        }
        self.ensure_folder(folder_id).await?;

        let created = self.blobs.upload(files).await?;
        let ids: Vec<FileId> = created.iter().map(|f| f.id.clone()).collect();
        self.overlays.assign(&ids, folder_id).await?;

        info!(
            count = created.len(),
            folder_id = ?folder_id,
            provider = self.blobs.provider_type(),
            "Files uploaded"
        );
        Ok(created)
    }

    /// Deletes a file from the Blob Store and drops its overlays.
    pub async fn delete_file(&self, file_id: &FileId) -> AppResult<()> {
        self.blobs.delete(file_id).await?;
        self.overlays.forget_file(file_id).await?;

        info!(file_id = %file_id, "File deleted");
        Ok(())
    }

    async fn ensure_folder(&self, folder_id: Option<FolderId>) -> AppResult<()> {
        match folder_id {
            Some(id) if self.folders.get(id).await.is_none() => {
                Err(AppError::not_found(format!("Folder {id} not found")))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use mediadesk_blob::providers::MemoryBlobStore;
    use mediadesk_core::error::ErrorKind;
    use mediadesk_core::traits::blob::BlobListParams;
    use mediadesk_kv::KeySpace;
    use mediadesk_kv::memory::MemoryKvStore;

    struct Fixture {
        service: FileService,
        folders: Arc<FolderStore>,
        overlays: Arc<OverlayStore>,
        blobs: MemoryBlobStore,
    }

    fn fixture() -> Fixture {
        let kv = Arc::new(MemoryKvStore::new());
        let keys = KeySpace::default();
        let folders = Arc::new(FolderStore::new(kv.clone(), &keys));
        let overlays = Arc::new(OverlayStore::new(kv, &keys));
        let blobs = MemoryBlobStore::new();
        let service = FileService::new(Arc::new(blobs.clone()), folders.clone(), overlays.clone());
        Fixture {
            service,
            folders,
            overlays,
            blobs,
        }
    }

    fn upload(name: &str) -> BlobUpload {
        BlobUpload {
            name: name.to_string(),
            mime_type: None,
            data: Bytes::from_static(b"content"),
        }
    }

    #[tokio::test]
    async fn test_upload_into_folder_maps_files() {
        let fx = fixture();
        let a = fx.folders.create("A", None).await.unwrap();
        let created = fx
            .service
            .upload(vec![upload("a.txt"), upload("b.txt")], Some(a.id))
            .await
            .unwrap();

        for record in &created {
            assert_eq!(fx.overlays.folder_of(&record.id).await, Some(a.id));
        }
    }

    #[tokio::test]
    async fn test_upload_at_root_records_explicit_entry() {
        let fx = fixture();
        let created = fx.service.upload(vec![upload("r.txt")], None).await.unwrap();
        assert_eq!(fx.overlays.mappings().await.get(&created[0].id), Some(&None));
    }

    #[tokio::test]
    async fn test_upload_to_unknown_folder_touches_nothing() {
        let fx = fixture();
        let err = fx
            .service
            .upload(vec![upload("x.txt")], Some(FolderId::new()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        let page = fx.blobs.list(&BlobListParams::default()).await.unwrap();
        assert!(page.files.is_empty());
    }

    #[tokio::test]
    async fn test_move_and_rename() {
        let fx = fixture();
        let a = fx.folders.create("A", None).await.unwrap();
        let file = FileId::from("remote-1");

        fx.service
            .move_files(MoveFilesRequest {
                file_ids: vec![file.clone()],
                target_folder_id: Some(a.id),
            })
            .await
            .unwrap();
        assert_eq!(fx.overlays.folder_of(&file).await, Some(a.id));

        let err = fx.service.rename_file(&file, "  ").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        fx.service.rename_file(&file, " Report.pdf ").await.unwrap();
        assert_eq!(
            fx.overlays.names().await.get(&file).map(String::as_str),
            Some("Report.pdf")
        );
    }

    #[tokio::test]
    async fn test_delete_removes_blob_and_overlays() {
        let fx = fixture();
        let created = fx.service.upload(vec![upload("gone.txt")], None).await.unwrap();
        let id = created[0].id.clone();
        fx.service.rename_file(&id, "Gone").await.unwrap();

        fx.service.delete_file(&id).await.unwrap();
        assert!(fx.overlays.mappings().await.is_empty());
        assert!(fx.overlays.names().await.is_empty());

        let err = fx.service.delete_file(&id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_blob_failure_propagates() {
        let fx = fixture();
        fx.blobs.set_offline(true);
        let err = fx.service.upload(vec![upload("a.txt")], None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
        assert!(fx.overlays.mappings().await.is_empty());
    }
}
