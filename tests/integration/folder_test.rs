//! Integration tests for folder operations.

mod helpers;

use chrono::Utc;

use mediadesk_blob::providers::MemoryBlobStore;
use mediadesk_core::error::ErrorKind;
use mediadesk_core::types::FolderId;
use mediadesk_entity::folder::Folder;
use mediadesk_service::MoveFolderRequest;

fn stored(id: FolderId, name: &str, parent_id: Option<FolderId>) -> Folder {
    Folder {
        id,
        name: name.to_string(),
        parent_id,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        item_count: 0,
    }
}

#[tokio::test]
async fn test_delete_cascades_and_returns_files_to_root() {
    let app = helpers::TestApp::with_files(vec![
        helpers::record("f1", "one.jpg"),
        helpers::record("f2", "two.jpg"),
        helpers::record("f3", "three.jpg"),
    ]);
    let a = app.folder("A", None).await;
    let b = app.folder("B", None).await;
    let a1 = app.folder("A1", Some(a.id)).await;
    app.place(&["f1", "f2"], Some(a.id)).await;
    app.place(&["f3"], Some(a1.id)).await;

    let outcome = app.ctx.folders.delete_folder(a.id).await.unwrap();
    assert_eq!(outcome.folders_removed.len(), 2);
    assert_eq!(outcome.files_unmapped, 3);

    let store = &app.ctx.folder_store;
    assert!(store.get(a.id).await.is_none());
    assert!(store.get(a1.id).await.is_none());
    assert!(store.list_by_parent(Some(a.id)).await.is_empty());
    assert!(store.list_by_parent(Some(a1.id)).await.is_empty());

    let root = app.ctx.listings.list(None).await;
    let folders: Vec<FolderId> = root.folders().map(|f| f.id).collect();
    assert_eq!(folders, vec![b.id]);
    assert_eq!(root.files().count(), 3);
}

#[tokio::test]
async fn test_path_terminates_on_corrupted_parents() {
    let app = helpers::TestApp::new();
    let (x, y, z) = (FolderId::new(), FolderId::new(), FolderId::new());
    app.seed_folders(&[
        stored(x, "X", Some(y)),
        stored(y, "Y", Some(x)),
        stored(z, "Z", Some(z)),
    ])
    .await;

    let path = app.ctx.folders.path(x).await;
    assert_eq!(path.len(), 2);
    assert_eq!(path.last().map(|f| f.id), Some(x));
    assert_eq!(app.ctx.folders.path(z).await.len(), 1);

    // Navigation into a cyclic folder still produces a finite trail.
    let session = app.ctx.session();
    session.open(x, "X").await.unwrap();
    assert_eq!(session.breadcrumbs().await.len(), 3);
}

#[tokio::test]
async fn test_move_validation() {
    let app = helpers::TestApp::new();
    let a = app.folder("A", None).await;
    let b = app.folder("B", None).await;
    let a1 = app.folder("A1", Some(a.id)).await;

    let into_child = app
        .ctx
        .folders
        .move_folder(a.id, MoveFolderRequest { new_parent_id: Some(a1.id) })
        .await
        .unwrap_err();
    assert_eq!(into_child.kind, ErrorKind::Validation);

    let into_unknown = app
        .ctx
        .folders
        .move_folder(a.id, MoveFolderRequest { new_parent_id: Some(FolderId::new()) })
        .await
        .unwrap_err();
    assert_eq!(into_unknown.kind, ErrorKind::NotFound);

    let moved = app
        .ctx
        .folders
        .move_folder(a.id, MoveFolderRequest { new_parent_id: Some(b.id) })
        .await
        .unwrap();
    assert_eq!(moved.parent_id, Some(b.id));

    let path: Vec<String> = app
        .ctx
        .folders
        .path(a1.id)
        .await
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(path, vec!["B", "A", "A1"]);
}

#[tokio::test]
async fn test_hierarchy_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().to_str().unwrap();
    let blobs = MemoryBlobStore::with_files(vec![helpers::record("f1", "kept.pdf")]);

    let (a_id, a1_id) = {
        let app = helpers::TestApp::on_disk(data_dir, blobs.clone()).await;
        let a = app.folder("Archive", None).await;
        let a1 = app.folder("2023", Some(a.id)).await;
        app.place(&["f1"], Some(a1.id)).await;
        app.ctx
            .files
            .rename_file(&"f1".into(), "Tax return.pdf")
            .await
            .unwrap();
        (a.id, a1.id)
    };

    let app = helpers::TestApp::on_disk(data_dir, blobs).await;
    let root = app.ctx.listings.list(None).await;
    assert_eq!(root.folder_named("Archive").map(|f| f.item_count), Some(1));

    let inner = app.ctx.listings.list(Some(a1_id)).await;
    let file = inner.files().next().unwrap();
    assert_eq!(file.display_name, "Tax return.pdf");
    assert_eq!(file.folder_id, Some(a1_id));
    assert_eq!(app.ctx.folders.path(a1_id).await[0].id, a_id);
}
