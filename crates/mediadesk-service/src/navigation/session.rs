//! A browsing session: navigation plus the listing on screen.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use mediadesk_core::result::AppResult;
use mediadesk_core::types::FolderId;
use mediadesk_entity::listing::DirectoryListing;
use mediadesk_entity::navigation::Breadcrumb;

use crate::listing::DirectoryListingService;

use super::navigator::Navigator;
use super::sequence::RequestSequencer;

/// Couples a [`Navigator`] with the listing it displays.
///
/// Every navigation triggers a refresh. When navigations overlap, only the
/// listing for the most recent one is kept.
#[derive(Debug, Clone)]
pub struct BrowserSession {
    navigator: Arc<Mutex<Navigator>>,
    listings: DirectoryListingService,
    sequencer: RequestSequencer,
    current: Arc<Mutex<Option<DirectoryListing>>>,
}

impl BrowserSession {
    pub fn new(navigator: Navigator, listings: DirectoryListingService) -> Self {
        Self {
            navigator: Arc::new(Mutex::new(navigator)),
            listings,
            sequencer: RequestSequencer::new(),
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// Open a folder and list it.
    pub async fn open(
        &self,
        folder_id: FolderId,
        folder_name: &str,
    ) -> AppResult<Option<DirectoryListing>> {
        self.navigator
            .lock()
            .await
            .navigate_into(folder_id, folder_name)
            .await;
        self.refresh().await
    }

    /// Go to the parent folder and list it.
    pub async fn up(&self) -> AppResult<Option<DirectoryListing>> {
        self.navigator.lock().await.navigate_up();
        self.refresh().await
    }

    /// Jump to a breadcrumb and list it.
    pub async fn jump(&self, index: usize) -> AppResult<Option<DirectoryListing>> {
        self.navigator.lock().await.navigate_to_index(index);
        self.refresh().await
    }

    /// Go back to root and list it.
    pub async fn home(&self) -> AppResult<Option<DirectoryListing>> {
        self.navigator.lock().await.navigate_root();
        self.refresh().await
    }

    /// List the current folder.
    ///
    /// Returns `Ok(None)` when a newer request started while this one was
    /// in flight; its result is dropped.
    pub async fn refresh(&self) -> AppResult<Option<DirectoryListing>> {
        let ticket = self.sequencer.begin();
        let folder_id = self.navigator.lock().await.current();

        let listing = self.listings.list(folder_id).await;
        if !self.sequencer.is_current(ticket) {
            debug!(ticket = ticket.value(), folder_id = ?folder_id, "Discarding stale listing");
            return Ok(None);
        }

        *self.current.lock().await = Some(listing.clone());
        Ok(Some(listing))
    }

    /// The listing currently displayed, if any.
    pub async fn listing(&self) -> Option<DirectoryListing> {
        self.current.lock().await.clone()
    }

    /// The breadcrumb trail.
    pub async fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.navigator.lock().await.breadcrumbs().to_vec()
    }
}
