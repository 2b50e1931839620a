//! Integration tests for the folder tree and move-target picker.

mod helpers;

use std::collections::HashSet;

use mediadesk_core::types::FolderId;

/// Builds a three-level hierarchy and returns every folder id, parents first.
async fn populate(app: &helpers::TestApp) -> Vec<FolderId> {
    let mut ids = Vec::new();
    for top in ["Music", "photos", "Docs"] {
        let t = app.folder(top, None).await;
        ids.push(t.id);
        for mid in ["b", "A", "c"] {
            let m = app.folder(&format!("{top}-{mid}"), Some(t.id)).await;
            ids.push(m.id);
            let leaf = app.folder("leaf", Some(m.id)).await;
            ids.push(leaf.id);
        }
    }
    ids
}

#[tokio::test]
async fn test_picker_excludes_folder_and_descendants() {
    let app = helpers::TestApp::new();
    let a = app.folder("A", None).await;
    let b = app.folder("B", None).await;
    let a1 = app.folder("A1", Some(a.id)).await;

    let targets = app.ctx.folders.move_targets(a.id).await;
    let ids: HashSet<FolderId> = targets.ids().into_iter().collect();
    assert!(ids.contains(&b.id));
    assert!(!ids.contains(&a.id));
    assert!(!ids.contains(&a1.id));
}

#[tokio::test]
async fn test_excluded_subtree_never_appears() {
    let app = helpers::TestApp::new();
    let ids = populate(&app).await;

    for &excluded in &ids {
        let descendants = app.ctx.folder_store.descendant_ids(excluded).await;
        let tree = app.ctx.trees.build(Some(excluded), None).await;
        let shown: HashSet<FolderId> = tree.ids().into_iter().collect();

        assert!(!shown.contains(&excluded));
        assert!(shown.is_disjoint(&descendants));
        assert_eq!(shown.len() + descendants.len() + 1, ids.len());
    }
}

#[tokio::test]
async fn test_tree_is_deterministic_and_sorted() {
    let app = helpers::TestApp::new();
    populate(&app).await;

    let first = app.ctx.folders.tree(None).await;
    for _ in 0..10 {
        assert_eq!(app.ctx.folders.tree(None).await, first);
    }

    let top: Vec<&str> = first.roots.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(top, vec!["Docs", "Music", "photos"]);
    let mids: Vec<&str> = first.roots[0].children.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(mids, vec!["Docs-A", "Docs-b", "Docs-c"]);
    assert_eq!(first.total_folders, 21);
}

#[tokio::test]
async fn test_same_named_folders_are_told_apart_by_path() {
    let app = helpers::TestApp::new();
    populate(&app).await;

    let tree = app.ctx.trees.build(None, Some("leaf")).await;
    let paths: HashSet<String> = tree
        .iter()
        .filter(|n| n.name == "leaf")
        .map(|n| n.display_path())
        .collect();
    assert_eq!(paths.len(), 9);
    assert!(paths.contains("/Music/Music-A/leaf"));
    // matches keep their ancestors
    assert_eq!(tree.total_folders, 21);
}
