//! Wiring of every service over one key-value store and one Blob Store.

use std::sync::Arc;

use mediadesk_core::config::browse::{ListingConfig, TreeConfig};
use mediadesk_core::traits::blob::BlobStore;
use mediadesk_core::traits::kv::KeyValueStore;
use mediadesk_kv::KeySpace;

use crate::file::FileService;
use crate::folder::{FolderService, FolderStore, FolderTreeBuilder};
use crate::listing::DirectoryListingService;
use crate::navigation::{BrowserSession, Navigator};
use crate::overlay::OverlayStore;

/// Every service, sharing the same stores.
///
/// Built once at startup and cloned freely; all state lives behind `Arc`.
#[derive(Debug, Clone)]
pub struct ServiceContext {
    pub folder_store: Arc<FolderStore>,
    pub overlays: Arc<OverlayStore>,
    pub folders: FolderService,
    pub files: FileService,
    pub listings: DirectoryListingService,
    pub trees: FolderTreeBuilder,
}

impl ServiceContext {
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        keys: &KeySpace,
        blobs: Arc<dyn BlobStore>,
        listing: &ListingConfig,
        tree: &TreeConfig,
    ) -> Self {
        let folder_store = Arc::new(FolderStore::new(Arc::clone(&kv), keys));
        let overlays = Arc::new(OverlayStore::new(kv, keys));
        let trees = FolderTreeBuilder::new(folder_store.clone(), tree.max_concurrency);

        Self {
            folders: FolderService::new(folder_store.clone(), overlays.clone(), trees.clone()),
            files: FileService::new(Arc::clone(&blobs), folder_store.clone(), overlays.clone()),
            listings: DirectoryListingService::new(
                folder_store.clone(),
                overlays.clone(),
                blobs,
                listing.page_size,
            ),
            trees,
            folder_store,
            overlays,
        }
    }

    /// A fresh browsing session positioned at root.
    pub fn session(&self) -> BrowserSession {
        BrowserSession::new(
            Navigator::new(self.folder_store.clone()),
            self.listings.clone(),
        )
    }
}
