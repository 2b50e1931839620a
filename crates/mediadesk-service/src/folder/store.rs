//! Persisted folder collection.
//!
//! The whole collection is stored as one JSON array under a single key.
//! Every mutation reads the array, changes it in memory, and writes it back
//! (last writer wins). Queries that fail to read, or that find invalid JSON,
//! behave as if no folders exist. Mutations never write after a failed read.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use mediadesk_core::error::AppError;
use mediadesk_core::result::AppResult;
use mediadesk_core::traits::kv::KeyValueStore;
use mediadesk_core::types::FolderId;
use mediadesk_entity::folder::{Folder, UpdateFolder};
use mediadesk_kv::KeySpace;

use super::tree::FolderSource;

/// CRUD and tree primitives over the persisted folder collection.
///
/// The store does not validate moves; callers exclude descendants first.
#[derive(Debug, Clone)]
pub struct FolderStore {
    kv: Arc<dyn KeyValueStore>,
    key: String,
}

impl FolderStore {
    /// Create a store over `kv` using the namespace's folder key.
    pub fn new(kv: Arc<dyn KeyValueStore>, keys: &KeySpace) -> Self {
        Self {
            kv,
            key: keys.folders(),
        }
    }

    /// Read the collection, propagating backend failures.
    ///
    /// An absent key or an unparsable document reads as empty.
    async fn try_load(&self) -> AppResult<Vec<Folder>> {
        let Some(raw) = self.kv.get(&self.key).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Folder>>(&raw) {
            Ok(folders) => Ok(folders),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Folder collection is corrupt; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Read the collection, degrading to empty on any failure.
    async fn load(&self) -> Vec<Folder> {
        match self.try_load().await {
            Ok(folders) => folders,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read folder collection; treating as empty");
                Vec::new()
            }
        }
    }

    /// Read the collection ahead of a write. A backend failure aborts the
    /// mutation so the stored document is never replaced by a partial view.
    async fn load_for_write(&self) -> AppResult<Vec<Folder>> {
        self.try_load().await.map_err(|e| {
            AppError::storage(format!("Failed to read folder collection before write: {e}"))
        })
    }

    async fn save(&self, folders: &[Folder]) -> AppResult<()> {
        let json = serde_json::to_string(folders)?;
        self.kv.set(&self.key, &json).await.map_err(|e| {
            AppError::storage(format!("Failed to persist folder collection: {e}"))
        })
    }

    /// Create a folder and persist it.
    pub async fn create(&self, name: &str, parent_id: Option<FolderId>) -> AppResult<Folder> {
        let mut folders = self.load_for_write().await?;
        let folder = Folder::new(name, parent_id);
        folders.push(folder.clone());
        self.save(&folders).await?;

        info!(folder_id = %folder.id, parent_id = ?parent_id, name, "Folder created");
        Ok(folder)
    }

    /// Get a folder by id.
    pub async fn get(&self, id: FolderId) -> Option<Folder> {
        self.load().await.into_iter().find(|f| f.id == id)
    }

    /// Every stored folder, in insertion order.
    pub async fn list_all(&self) -> Vec<Folder> {
        self.load().await
    }

    /// Folders whose parent is exactly `parent_id` (`None` lists top level).
    pub async fn list_by_parent(&self, parent_id: Option<FolderId>) -> Vec<Folder> {
        children_of(self.load().await, parent_id)
    }

    /// Like [`list_by_parent`](Self::list_by_parent), but reports backend failures.
    pub async fn try_list_by_parent(&self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>> {
        Ok(children_of(self.try_load().await?, parent_id))
    }

    /// Merge `changes` into a folder. Returns `None` if the folder is absent.
    pub async fn update(&self, id: FolderId, changes: UpdateFolder) -> AppResult<Option<Folder>> {
        let mut folders = self.load_for_write().await?;
        let Some(folder) = folders.iter_mut().find(|f| f.id == id) else {
            debug!(folder_id = %id, "Update skipped; folder not found");
            return Ok(None);
        };
        changes.apply_to(folder);
        let updated = folder.clone();
        self.save(&folders).await?;
        Ok(Some(updated))
    }

    /// Re-parent a folder without any cycle check.
    pub async fn move_to(
        &self,
        id: FolderId,
        new_parent_id: Option<FolderId>,
    ) -> AppResult<Option<Folder>> {
        let moved = self.update(id, UpdateFolder::reparent(new_parent_id)).await?;
        if moved.is_some() {
            info!(folder_id = %id, new_parent_id = ?new_parent_id, "Folder moved");
        }
        Ok(moved)
    }

    /// Delete a folder and every transitive descendant.
    ///
    /// Returns the ids that were removed; empty when nothing matched.
    pub async fn delete(&self, id: FolderId) -> AppResult<Vec<FolderId>> {
        let mut folders = self.load_for_write().await?;

        let mut doomed = collect_descendants(&folders, id);
        if folders.iter().any(|f| f.id == id) {
            doomed.insert(id);
        }
        if doomed.is_empty() {
            return Ok(Vec::new());
        }

        let mut removed = Vec::with_capacity(doomed.len());
        folders.retain(|f| {
            if doomed.contains(&f.id) {
                removed.push(f.id);
                false
            } else {
                true
            }
        });
        self.save(&folders).await?;

        info!(folder_id = %id, removed = removed.len(), "Folder deleted with descendants");
        Ok(removed)
    }

    /// Ancestor chain of `id`, root-first and ending with `id` itself.
    ///
    /// Stops early at a broken parent link or a cycle; never loops.
    pub async fn path_to(&self, id: FolderId) -> Vec<Folder> {
        let by_id: HashMap<FolderId, Folder> =
            self.load().await.into_iter().map(|f| (f.id, f)).collect();

        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if !seen.insert(current) {
                warn!(folder_id = %current, "Cycle in folder parents; truncating path");
                break;
            }
            let Some(folder) = by_id.get(&current) else {
                if !chain.is_empty() {
                    warn!(folder_id = %current, "Broken parent link; returning partial path");
                }
                break;
            };
            cursor = folder.parent_id;
            chain.push(folder.clone());
        }
        chain.reverse();
        chain
    }

    /// Every transitive descendant of `id`, not including `id`.
    pub async fn descendant_ids(&self, id: FolderId) -> HashSet<FolderId> {
        collect_descendants(&self.load().await, id)
    }
}

#[async_trait]
impl FolderSource for FolderStore {
    async fn children(&self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>> {
        self.try_list_by_parent(parent_id).await
    }
}

fn children_of(folders: Vec<Folder>, parent_id: Option<FolderId>) -> Vec<Folder> {
    folders
        .into_iter()
        .filter(|f| f.parent_id == parent_id)
        .collect()
}

/// Breadth-first walk of the parent links below `id`.
///
/// Tolerates cycles: each folder is visited once and `id` is never part of
/// the result.
pub(crate) fn collect_descendants<'a, I>(folders: I, id: FolderId) -> HashSet<FolderId>
where
    I: IntoIterator<Item = &'a Folder>,
{
    let mut children: HashMap<FolderId, Vec<FolderId>> = HashMap::new();
    for folder in folders {
        if let Some(parent) = folder.parent_id {
            children.entry(parent).or_default().push(folder.id);
        }
    }

    let mut found = HashSet::new();
    let mut queue = VecDeque::from([id]);
    while let Some(current) = queue.pop_front() {
        for &child in children.get(&current).into_iter().flatten() {
            if child != id && found.insert(child) {
                queue.push_back(child);
            }
        }
    }
    found
}
