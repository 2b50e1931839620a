//! Validated folder operations.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use mediadesk_core::error::AppError;
use mediadesk_core::result::AppResult;
use mediadesk_core::types::FolderId;
use mediadesk_entity::folder::{Folder, FolderTree, UpdateFolder};

use crate::overlay::OverlayStore;

use super::store::FolderStore;
use super::tree::FolderTreeBuilder;

/// Manages folder mutations on top of [`FolderStore`].
///
/// The store accepts anything; this service rejects empty names, unknown
/// parents, and moves that would create a cycle.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder collection.
    store: Arc<FolderStore>,
    /// File overlays, cleared when folders go away.
    overlays: Arc<OverlayStore>,
    /// Picker tree builder.
    trees: FolderTreeBuilder,
}

/// Request to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// Parent folder ID (`None` for top level).
    #[serde(default)]
    pub parent_id: Option<FolderId>,
    /// Folder name.
    pub name: String,
}

/// Request to move a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFolderRequest {
    /// New parent folder ID (`None` moves to root).
    #[serde(default)]
    pub new_parent_id: Option<FolderId>,
}

/// What a folder deletion removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    /// The deleted folder and all of its descendants.
    pub folders_removed: Vec<FolderId>,
    /// Number of files whose assignment was cleared (they are now at root).
    pub files_unmapped: usize,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        store: Arc<FolderStore>,
        overlays: Arc<OverlayStore>,
        trees: FolderTreeBuilder,
    ) -> Self {
        Self {
            store,
            overlays,
            trees,
        }
    }

    /// Gets a folder by ID.
    pub async fn get_folder(&self, id: FolderId) -> AppResult<Folder> {
        self.store
            .get(id)
            .await
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    /// Creates a new folder.
    pub async fn create_folder(&self, req: CreateFolderRequest) -> AppResult<Folder> {
        let name = validate_name(&req.name)?;
        if let Some(parent_id) = req.parent_id {
            self.get_folder(parent_id).await?;
        }
        self.store.create(name, req.parent_id).await
    }

    /// Renames a folder.
    pub async fn rename_folder(&self, id: FolderId, name: &str) -> AppResult<Folder> {
        let name = validate_name(name)?;
        let folder = self
            .store
            .update(id, UpdateFolder::rename(name))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;

        info!(folder_id = %id, name, "Folder renamed");
        Ok(folder)
    }

    /// Moves a folder under a new parent.
    pub async fn move_folder(&self, id: FolderId, req: MoveFolderRequest) -> AppResult<Folder> {
        self.get_folder(id).await?;

        if let Some(target) = req.new_parent_id {
            if target == id {
                return Err(AppError::validation("Cannot move a folder into itself"));
            }
            if self.store.descendant_ids(id).await.contains(&target) {
                return Err(AppError::validation(
                    "Cannot move a folder into one of its descendants",
                ));
            }
            self.get_folder(target).await?;
        }

        self.store
            .move_to(id, req.new_parent_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    /// Deletes a folder with its descendants and returns their files to root.
    pub async fn delete_folder(&self, id: FolderId) -> AppResult<DeleteOutcome> {
        let folders_removed = self.store.delete(id).await?;
        if folders_removed.is_empty() {
            return Err(AppError::not_found(format!("Folder {id} not found")));
        }

        let removed: HashSet<FolderId> = folders_removed.iter().copied().collect();
        let files_unmapped = self.overlays.clear_folders(&removed).await?;

        info!(
            folder_id = %id,
            folders_removed = folders_removed.len(),
            files_unmapped,
            "Folder subtree deleted"
        );
        Ok(DeleteOutcome {
            folders_removed,
            files_unmapped,
        })
    }

    /// Root-first chain of folders leading to `id`.
    pub async fn path(&self, id: FolderId) -> Vec<Folder> {
        self.store.path_to(id).await
    }

    /// The full tree, optionally narrowed by a name filter.
    pub async fn tree(&self, filter: Option<&str>) -> FolderTree {
        self.trees.build(None, filter).await
    }

    /// Valid destinations for moving `id`: every folder except `id` and its
    /// descendants.
    pub async fn move_targets(&self, id: FolderId) -> FolderTree {
        self.trees.build(Some(id), None).await
    }
}

fn validate_name(name: &str) -> AppResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Folder name cannot be empty"));
    }
    Ok(trimmed)
}
