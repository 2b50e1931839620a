//! Merged folder + file listing for one folder.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};

use mediadesk_core::result::AppResult;
use mediadesk_core::traits::blob::{BlobListParams, BlobStore, FileRecord};
use mediadesk_core::types::{FolderId, PageRequest};
use mediadesk_entity::file::DisplayFile;
use mediadesk_entity::folder::Folder;
use mediadesk_entity::listing::{DirectoryEntry, DirectoryListing};

use crate::folder::FolderStore;
use crate::overlay::OverlayStore;

/// Produces the contents of a folder from the folder collection, the
/// overlays, and the full Blob Store file set.
#[derive(Debug, Clone)]
pub struct DirectoryListingService {
    folders: Arc<FolderStore>,
    overlays: Arc<OverlayStore>,
    blobs: Arc<dyn BlobStore>,
    page_size: u64,
}

impl DirectoryListingService {
    pub fn new(
        folders: Arc<FolderStore>,
        overlays: Arc<OverlayStore>,
        blobs: Arc<dyn BlobStore>,
        page_size: u64,
    ) -> Self {
        Self {
            folders,
            overlays,
            blobs,
            page_size,
        }
    }

    /// List the contents of `current` (`None` lists root).
    ///
    /// Folders come first, then files. If the Blob Store cannot be read the
    /// listing carries the error and holds folders only.
    pub async fn list(&self, current: Option<FolderId>) -> DirectoryListing {
        let all_folders = self.folders.list_all().await;
        let mappings = self.overlays.mappings().await;
        let known: HashSet<FolderId> = all_folders.iter().map(|f| f.id).collect();

        let mut child_counts: HashMap<FolderId, u64> = HashMap::new();
        for folder in &all_folders {
            if let Some(parent) = folder.parent_id {
                *child_counts.entry(parent).or_default() += 1;
            }
        }
        for folder in mappings.values().flatten() {
            *child_counts.entry(*folder).or_default() += 1;
        }

        let mut children: Vec<Folder> = all_folders
            .into_iter()
            .filter(|f| f.parent_id == current)
            .map(|mut f| {
                f.item_count = child_counts.get(&f.id).copied().unwrap_or(0);
                f
            })
            .collect();
        children.sort_by(|a, b| by_name(&a.name, &b.name));

        let mut entries: Vec<DirectoryEntry> =
            children.into_iter().map(DirectoryEntry::Folder).collect();

        let records = match self.fetch_all_files().await {
            Ok(records) => records,
            Err(e) => {
                warn!(folder_id = ?current, error = %e, "Blob Store unavailable; listing folders only");
                return DirectoryListing {
                    folder_id: current,
                    entries,
                    blob_error: Some(e.to_string()),
                };
            }
        };

        let names = self.overlays.names().await;
        let mut files: Vec<DisplayFile> = records
            .into_iter()
            .filter_map(|record| {
                // A mapping to a folder that no longer exists places the file at root.
                let placed = mappings
                    .get(&record.id)
                    .copied()
                    .flatten()
                    .filter(|id| known.contains(id));
                if placed != current {
                    return None;
                }
                let rename = names.get(&record.id).map(String::as_str);
                Some(DisplayFile::new(record, rename, placed))
            })
            .collect();
        files.sort_by(|a, b| by_name(&a.display_name, &b.display_name));

        debug!(
            folder_id = ?current,
            folders = entries.len(),
            files = files.len(),
            "Built directory listing"
        );
        entries.extend(files.into_iter().map(DirectoryEntry::File));

        DirectoryListing {
            folder_id: current,
            entries,
            blob_error: None,
        }
    }

    /// Fetch every page of the Blob Store file set.
    ///
    /// The page count follows the limit the server reports. An empty page,
    /// or one holding only ids already seen, ends the walk early; duplicate
    /// ids across pages are dropped.
    pub async fn fetch_all_files(&self) -> AppResult<Vec<FileRecord>> {
        let first = self
            .blobs
            .list(&BlobListParams::page(PageRequest::new(1, self.page_size)))
            .await?;

        let total_pages = first.pagination.total_pages();
        let limit = first.pagination.limit;
        let mut seen = HashSet::new();
        let mut files: Vec<FileRecord> = Vec::new();
        let mut push_unique = |batch: Vec<FileRecord>| {
            let before = files.len();
            for record in batch {
                if seen.insert(record.id.clone()) {
                    files.push(record);
                }
            }
            files.len() - before
        };

        if push_unique(first.files) > 0 {
            for page in 2..=total_pages {
                let params = BlobListParams::page(PageRequest { page, limit });
                let next = self.blobs.list(&params).await?;
                if next.files.is_empty() {
                    debug!(page, "Blob Store returned an empty page; stopping");
                    break;
                }
                if push_unique(next.files) == 0 {
                    debug!(page, "Blob Store repeated a page; stopping");
                    break;
                }
            }
        }

        Ok(files)
    }
}

fn by_name(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
