//! Integration tests for directory listings.

mod helpers;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use mediadesk_blob::providers::MemoryBlobStore;
use mediadesk_core::config::browse::{ListingConfig, TreeConfig};
use mediadesk_core::result::AppResult;
use mediadesk_core::traits::blob::{BlobListParams, BlobPage, BlobStore, BlobUpload, FileRecord};
use mediadesk_core::types::FileId;
use mediadesk_kv::KeySpace;
use mediadesk_kv::memory::MemoryKvStore;
use mediadesk_service::ServiceContext;

#[tokio::test]
async fn test_root_and_folder_contents() {
    let app = helpers::TestApp::with_files(vec![
        helpers::record("f1", "beach.jpg"),
        helpers::record("f2", "Alps.jpg"),
        helpers::record("f3", "notes.txt"),
    ]);
    let a = app.folder("A", None).await;
    let b = app.folder("B", None).await;
    app.folder("A1", Some(a.id)).await;
    app.place(&["f1", "f2"], Some(a.id)).await;

    let root = app.ctx.listings.list(None).await;
    let names: Vec<&str> = root.entries.iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["A", "B", "notes.txt"]);
    assert_eq!(root.folder_named("A").unwrap().item_count, 3);
    assert_eq!(root.folder_named("B").unwrap().item_count, 0);

    let in_a = app.ctx.listings.list(Some(a.id)).await;
    let names: Vec<&str> = in_a.entries.iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["A1", "Alps.jpg", "beach.jpg"]);

    assert!(app.ctx.listings.list(Some(b.id)).await.entries.is_empty());
}

#[tokio::test]
async fn test_three_level_walkthrough() {
    let app = helpers::TestApp::with_files(vec![
        helpers::record("f1", "one.txt"),
        helpers::record("f2", "two.txt"),
        helpers::record("f3", "three.txt"),
    ]);
    let a = app.folder("A", None).await;
    let b = app.folder("B", None).await;
    let a1 = app.folder("A1", Some(a.id)).await;
    app.place(&["f1"], Some(a.id)).await;
    app.place(&["f2"], Some(a1.id)).await;
    app.place(&["f3"], None).await;

    let ids = |listing: &mediadesk_entity::listing::DirectoryListing| -> Vec<String> {
        listing.files().map(|f| f.record.id.as_str().to_string()).collect()
    };

    let root = app.ctx.listings.list(None).await;
    assert_eq!(root.folders().count(), 2);
    assert_eq!(root.folder_named("A").unwrap().item_count, 2);
    assert_eq!(root.folder_named("B").unwrap().item_count, 0);
    assert_eq!(ids(&root), vec!["f3"]);

    let in_a = app.ctx.listings.list(Some(a.id)).await;
    assert_eq!(in_a.folders().count(), 1);
    assert_eq!(in_a.folder_named("A1").unwrap().item_count, 1);
    assert_eq!(ids(&in_a), vec!["f1"]);

    let in_a1 = app.ctx.listings.list(Some(a1.id)).await;
    assert_eq!(in_a1.folders().count(), 0);
    assert_eq!(ids(&in_a1), vec!["f2"]);

    let targets = app.ctx.folders.move_targets(a.id).await;
    assert!(targets.find(a.id).is_none());
    assert!(targets.find(a1.id).is_none());
    assert!(targets.find(b.id).is_some());

    app.ctx.folders.delete_folder(a.id).await.unwrap();
    let root = app.ctx.listings.list(None).await;
    let folders: Vec<&str> = root.folders().map(|f| f.name.as_str()).collect();
    assert_eq!(folders, vec!["B"]);
    assert!(ids(&root).contains(&"f3".to_string()));
    // mappings into the deleted subtree are cleared, so f1 and f2 return to root
    assert_eq!(ids(&root).len(), 3);
    assert_eq!(app.ctx.listings.list(Some(a1.id)).await.files().count(), 0);
}

#[tokio::test]
async fn test_item_count_is_recomputed_every_listing() {
    let app = helpers::TestApp::with_files(vec![helpers::record("f1", "a.txt")]);
    let a = app.folder("A", None).await;

    let count = |listing: &mediadesk_entity::listing::DirectoryListing| {
        listing.folder_named("A").map(|f| f.item_count)
    };
    assert_eq!(count(&app.ctx.listings.list(None).await), Some(0));

    app.place(&["f1"], Some(a.id)).await;
    app.folder("Inner", Some(a.id)).await;
    assert_eq!(count(&app.ctx.listings.list(None).await), Some(2));

    app.place(&["f1"], None).await;
    assert_eq!(count(&app.ctx.listings.list(None).await), Some(1));
}

#[tokio::test]
async fn test_large_blob_store_is_fully_listed() {
    let files = (0..250)
        .map(|i| helpers::record(&format!("f{i:03}"), &format!("file-{i:03}.bin")))
        .collect();
    let app = helpers::TestApp::with_files(files);

    let root = app.ctx.listings.list(None).await;
    assert_eq!(root.files().count(), 250);
    assert_eq!(root.files().next().unwrap().display_name, "file-000.bin");
}

#[tokio::test]
async fn test_blob_outage_keeps_folders_visible() {
    let app = helpers::TestApp::with_files(vec![helpers::record("f1", "a.txt")]);
    let a = app.folder("A", None).await;
    app.place(&["f1"], Some(a.id)).await;
    app.blobs.set_offline(true);

    let root = app.ctx.listings.list(None).await;
    assert!(root.is_degraded());
    assert_eq!(root.folders().count(), 1);
    assert_eq!(root.folder_named("A").unwrap().item_count, 1);
    assert_eq!(root.files().count(), 0);

    app.blobs.set_offline(false);
    assert!(!app.ctx.listings.list(Some(a.id)).await.is_degraded());
}

/// Blob Store that reports a far larger total than it holds.
#[derive(Debug)]
struct OverReportingStore {
    inner: MemoryBlobStore,
    calls: AtomicUsize,
}

#[async_trait]
impl BlobStore for OverReportingStore {
    fn provider_type(&self) -> &str {
        "over-reporting"
    }

    async fn list(&self, params: &BlobListParams) -> AppResult<BlobPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut page = self.inner.list(params).await?;
        page.pagination.total = 10_000;
        Ok(page)
    }

    async fn upload(&self, files: Vec<BlobUpload>) -> AppResult<Vec<FileRecord>> {
        self.inner.upload(files).await
    }

    async fn delete(&self, id: &FileId) -> AppResult<()> {
        self.inner.delete(id).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[tokio::test]
async fn test_empty_page_stops_pagination() {
    let files = (0..5)
        .map(|i| helpers::record(&format!("f{i}"), &format!("{i}.txt")))
        .collect();
    let blobs = Arc::new(OverReportingStore {
        inner: MemoryBlobStore::with_files(files),
        calls: AtomicUsize::new(0),
    });
    let ctx = ServiceContext::new(
        Arc::new(MemoryKvStore::new()),
        &KeySpace::default(),
        blobs.clone(),
        &ListingConfig { page_size: 2 },
        &TreeConfig::default(),
    );

    let fetched = ctx.listings.fetch_all_files().await.unwrap();
    assert_eq!(fetched.len(), 5);
    // pages 1, 2 and 3 hold files; page 4 is empty and ends the walk
    assert_eq!(blobs.calls.load(Ordering::SeqCst), 4);
}
