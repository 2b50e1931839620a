//! Integration tests for file operations.

mod helpers;

use mediadesk_core::error::ErrorKind;
use mediadesk_core::types::{FileId, FolderId};
use mediadesk_service::MoveFilesRequest;

#[tokio::test]
async fn test_upload_lands_in_current_folder() {
    let app = helpers::TestApp::new();
    let a = app.folder("Inbox", None).await;

    let created = app
        .ctx
        .files
        .upload(vec![helpers::upload("scan.pdf"), helpers::upload("memo.txt")], Some(a.id))
        .await
        .unwrap();
    assert_eq!(created.len(), 2);

    let inbox = app.ctx.listings.list(Some(a.id)).await;
    let names: Vec<&str> = inbox.files().map(|f| f.display_name.as_str()).collect();
    assert_eq!(names, vec!["memo.txt", "scan.pdf"]);
    assert_eq!(app.ctx.listings.list(None).await.files().count(), 0);
}

#[tokio::test]
async fn test_move_then_rename_keeps_remote_identity() {
    let app = helpers::TestApp::with_files(vec![helpers::record("f1", "IMG_2041.jpg")]);
    let a = app.folder("Holiday", None).await;

    app.ctx
        .files
        .move_files(MoveFilesRequest {
            file_ids: vec![FileId::from("f1")],
            target_folder_id: Some(a.id),
        })
        .await
        .unwrap();
    app.ctx
        .files
        .rename_file(&FileId::from("f1"), "Sunset.jpg")
        .await
        .unwrap();

    let listing = app.ctx.listings.list(Some(a.id)).await;
    let file = listing.files().next().unwrap();
    assert_eq!(file.display_name, "Sunset.jpg");
    assert_eq!(file.record.id, FileId::from("f1"));
    assert_eq!(file.record.remote_name(), "IMG_2041.jpg");
    assert_eq!(file.record.url, "https://cdn.example.com/f1");
}

#[tokio::test]
async fn test_move_to_unknown_folder_is_rejected() {
    let app = helpers::TestApp::with_files(vec![helpers::record("f1", "a.txt")]);
    let err = app
        .ctx
        .files
        .move_files(MoveFilesRequest {
            file_ids: vec![FileId::from("f1")],
            target_folder_id: Some(FolderId::new()),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(app.ctx.overlays.mappings().await.is_empty());
}

#[tokio::test]
async fn test_delete_file_removes_it_everywhere() {
    let app = helpers::TestApp::new();
    let a = app.folder("A", None).await;
    let created = app
        .ctx
        .files
        .upload(vec![helpers::upload("old.log")], Some(a.id))
        .await
        .unwrap();
    let id = created[0].id.clone();

    app.ctx.files.delete_file(&id).await.unwrap();

    assert_eq!(app.ctx.listings.list(Some(a.id)).await.files().count(), 0);
    let root = app.ctx.listings.list(None).await;
    assert_eq!(root.folder_named("A").unwrap().item_count, 0);
    assert_eq!(root.files().count(), 0);
}
