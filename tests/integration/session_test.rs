//! Integration tests for browsing sessions.

mod helpers;

#[tokio::test]
async fn test_browse_down_and_back_up() {
    let app = helpers::TestApp::with_files(vec![
        helpers::record("f1", "top.txt"),
        helpers::record("f2", "deep.txt"),
    ]);
    let a = app.folder("A", None).await;
    let a1 = app.folder("A1", Some(a.id)).await;
    app.place(&["f2"], Some(a1.id)).await;

    let session = app.ctx.session();
    let root = session.refresh().await.unwrap().unwrap();
    assert_eq!(root.files().count(), 1);

    session.open(a.id, "A").await.unwrap();
    let deep = session.open(a1.id, "A1").await.unwrap().unwrap();
    assert_eq!(deep.files().next().unwrap().display_name, "deep.txt");

    let crumbs: Vec<String> = session
        .breadcrumbs()
        .await
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(crumbs, vec!["Root", "A", "A1"]);

    let back = session.jump(0).await.unwrap().unwrap();
    assert_eq!(back.folder_id, None);
    assert_eq!(session.breadcrumbs().await.len(), 1);
}

#[tokio::test]
async fn test_opening_deep_folder_directly_builds_full_trail() {
    let app = helpers::TestApp::new();
    let a = app.folder("A", None).await;
    let a1 = app.folder("A1", Some(a.id)).await;
    let a1x = app.folder("A1x", Some(a1.id)).await;

    let session = app.ctx.session();
    session.open(a1x.id, "A1x").await.unwrap();
    assert_eq!(session.breadcrumbs().await.len(), 4);

    session.up().await.unwrap();
    let listing = session.listing().await.unwrap();
    assert_eq!(listing.folder_id, Some(a1.id));
    assert!(listing.folder_named("A1x").is_some());

    session.home().await.unwrap();
    assert_eq!(session.listing().await.unwrap().folder_id, None);
}
