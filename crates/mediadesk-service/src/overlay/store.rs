//! Client-side overlays on Blob Store files.
//!
//! Two maps are persisted next to the folder collection:
//!
//! - file id → folder id (`None` records an explicit root placement)
//! - file id → display name
//!
//! Files without an assignment live in root. Neither map is ever written
//! back to the Blob Store. Queries degrade to empty maps when the backend
//! fails; mutations abort instead of writing over data they could not read.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use mediadesk_core::error::AppError;
use mediadesk_core::result::AppResult;
use mediadesk_core::traits::kv::KeyValueStore;
use mediadesk_core::types::{FileId, FolderId};
use mediadesk_kv::KeySpace;

/// File → folder assignments.
pub type FolderMappings = BTreeMap<FileId, Option<FolderId>>;

/// File display-name overrides.
pub type NameOverrides = BTreeMap<FileId, String>;

/// Reads and writes the file overlay maps.
#[derive(Debug, Clone)]
pub struct OverlayStore {
    kv: Arc<dyn KeyValueStore>,
    mapping_key: String,
    names_key: String,
}

impl OverlayStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, keys: &KeySpace) -> Self {
        Self {
            kv,
            mapping_key: keys.file_folder_map(),
            names_key: keys.file_names(),
        }
    }

    /// Current file → folder assignments.
    pub async fn mappings(&self) -> FolderMappings {
        self.load(&self.mapping_key).await
    }

    /// Current display-name overrides.
    pub async fn names(&self) -> NameOverrides {
        self.load(&self.names_key).await
    }

    /// Folder a file is assigned to; `None` means root.
    pub async fn folder_of(&self, file: &FileId) -> Option<FolderId> {
        self.mappings().await.get(file).copied().flatten()
    }

    /// Assign `files` to `folder` (`None` assigns to root).
    pub async fn assign(&self, files: &[FileId], folder: Option<FolderId>) -> AppResult<()> {
        if files.is_empty() {
            return Ok(());
        }
        let mut mappings: FolderMappings = self.load_for_write(&self.mapping_key).await?;
        for file in files {
            mappings.insert(file.clone(), folder);
        }
        self.save(&self.mapping_key, &mappings).await?;

        info!(count = files.len(), folder_id = ?folder, "Files assigned");
        Ok(())
    }

    /// Drop every assignment that points at one of `folders`.
    ///
    /// Affected files fall back to root. Returns how many were cleared.
    pub async fn clear_folders(&self, folders: &HashSet<FolderId>) -> AppResult<usize> {
        let mut mappings: FolderMappings = self.load_for_write(&self.mapping_key).await?;
        let before = mappings.len();
        mappings.retain(|_, folder| !folder.is_some_and(|id| folders.contains(&id)));
        let cleared = before - mappings.len();
        if cleared > 0 {
            self.save(&self.mapping_key, &mappings).await?;
        }
        Ok(cleared)
    }

    /// Record a display-name override.
    pub async fn rename(&self, file: &FileId, name: &str) -> AppResult<()> {
        let mut names: NameOverrides = self.load_for_write(&self.names_key).await?;
        names.insert(file.clone(), name.to_string());
        self.save(&self.names_key, &names).await
    }

    /// Remove every overlay entry for `file`.
    pub async fn forget_file(&self, file: &FileId) -> AppResult<()> {
        let mut mappings: FolderMappings = self.load_for_write(&self.mapping_key).await?;
        if mappings.remove(file).is_some() {
            self.save(&self.mapping_key, &mappings).await?;
        }
        let mut names: NameOverrides = self.load_for_write(&self.names_key).await?;
        if names.remove(file).is_some() {
            self.save(&self.names_key, &names).await?;
        }
        Ok(())
    }

    /// Read an overlay map, propagating backend failures.
    ///
    /// An absent key or an unparsable document reads as empty.
    async fn try_load<T>(&self, key: &str) -> AppResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.kv.get(key).await? else {
            return Ok(T::default());
        };
        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(key, error = %e, "Overlay is corrupt; treating as empty");
            T::default()
        }))
    }

    async fn load<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        self.try_load(key).await.unwrap_or_else(|e| {
            warn!(key, error = %e, "Failed to read overlay; treating as empty");
            T::default()
        })
    }

    async fn load_for_write<T>(&self, key: &str) -> AppResult<T>
    where
        T: DeserializeOwned + Default,
    {
        self.try_load(key).await.map_err(|e| {
            AppError::storage(format!("Failed to read overlay {key} before write: {e}"))
        })
    }

    async fn save<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.kv
            .set(key, &json)
            .await
            .map_err(|e| AppError::storage(format!("Failed to persist overlay {key}: {e}")))
    }
}
