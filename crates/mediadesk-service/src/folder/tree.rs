//! Folder tree construction for the move-target picker.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use mediadesk_core::result::AppResult;
use mediadesk_core::types::FolderId;
use mediadesk_entity::folder::{Folder, FolderNode, FolderTree};

use super::store::collect_descendants;

/// Source of child folders, one parent at a time.
#[async_trait]
pub trait FolderSource: Send + Sync + std::fmt::Debug {
    /// Direct children of `parent_id` (`None` for top level).
    async fn children(&self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>>;
}

/// Builds the nested folder tree by walking the hierarchy level by level.
#[derive(Debug, Clone)]
pub struct FolderTreeBuilder {
    source: Arc<dyn FolderSource>,
    max_concurrency: usize,
}

impl FolderTreeBuilder {
    pub fn new(source: Arc<dyn FolderSource>, max_concurrency: usize) -> Self {
        Self {
            source,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Build the tree, dropping `exclude` with its descendants and keeping
    /// only names that contain `filter` (case-insensitive) plus their
    /// ancestors.
    pub async fn build(&self, exclude: Option<FolderId>, filter: Option<&str>) -> FolderTree {
        let discovered = self.discover().await;
        assemble(discovered, exclude, filter)
    }

    /// Fetch every reachable folder.
    ///
    /// Each level's fetches run concurrently (bounded) and the level is
    /// joined before the next one starts. A parent is never fetched twice.
    pub async fn discover(&self) -> Vec<Folder> {
        let mut visited: HashSet<Option<FolderId>> = HashSet::new();
        let mut level: Vec<Option<FolderId>> = vec![None];
        let mut found = Vec::new();
        let mut depth = 0usize;

        while !level.is_empty() {
            level.retain(|parent| visited.insert(*parent));
            if level.is_empty() {
                break;
            }

            let batches: Vec<Vec<Folder>> = stream::iter(level)
                .map(|parent| self.fetch_children(parent))
                .buffer_unordered(self.max_concurrency)
                .collect()
                .await;

            level = Vec::new();
            for folder in batches.into_iter().flatten() {
                level.push(Some(folder.id));
                found.push(folder);
            }
            debug!(depth, next = level.len(), "Discovered folder tree level");
            depth += 1;
        }

        found
    }

    async fn fetch_children(&self, parent: Option<FolderId>) -> Vec<Folder> {
        match self.source.children(parent).await {
            Ok(children) => children,
            Err(e) => {
                warn!(parent_id = ?parent, error = %e, "Failed to fetch child folders; skipping branch");
                Vec::new()
            }
        }
    }
}

/// Turn a discovered folder set into a sorted, filtered tree.
pub(crate) fn assemble(
    discovered: Vec<Folder>,
    exclude: Option<FolderId>,
    filter: Option<&str>,
) -> FolderTree {
    let mut by_id: HashMap<FolderId, Folder> = HashMap::new();
    for folder in discovered {
        by_id.insert(folder.id, folder);
    }

    if let Some(excluded) = exclude {
        let mut dropped = collect_descendants(by_id.values(), excluded);
        dropped.insert(excluded);
        by_id.retain(|id, _| !dropped.contains(id));
    }

    if let Some(needle) = filter.map(str::trim).filter(|n| !n.is_empty()) {
        let needle = needle.to_lowercase();
        let mut keep = HashSet::new();
        for folder in by_id.values() {
            if !folder.name.to_lowercase().contains(&needle) {
                continue;
            }
            let mut cursor = Some(folder.id);
            while let Some(id) = cursor {
                if !keep.insert(id) {
                    break;
                }
                cursor = by_id.get(&id).and_then(|f| f.parent_id);
            }
        }
        by_id.retain(|id, _| keep.contains(id));
    }

    let mut by_parent: HashMap<Option<FolderId>, Vec<&Folder>> = HashMap::new();
    for folder in by_id.values() {
        // Folders whose parent did not survive are unreachable from root.
        let parent = folder.parent_id.filter(|p| by_id.contains_key(p));
        if folder.parent_id.is_some() && parent.is_none() {
            continue;
        }
        by_parent.entry(parent).or_default().push(folder);
    }
    for siblings in by_parent.values_mut() {
        siblings.sort_by(|a, b| sibling_order(a, b));
    }

    let mut placed = HashSet::new();
    let roots = build_level(&by_parent, None, &[], &mut placed);
    FolderTree {
        roots,
        total_folders: placed.len() as u64,
    }
}

fn build_level(
    by_parent: &HashMap<Option<FolderId>, Vec<&Folder>>,
    parent: Option<FolderId>,
    parent_path: &[String],
    placed: &mut HashSet<FolderId>,
) -> Vec<FolderNode> {
    let Some(siblings) = by_parent.get(&parent) else {
        return Vec::new();
    };

    let mut nodes = Vec::with_capacity(siblings.len());
    for folder in siblings {
        if !placed.insert(folder.id) {
            continue;
        }
        let mut path = parent_path.to_vec();
        path.push(folder.name.clone());
        let children = build_level(by_parent, Some(folder.id), &path, placed);
        nodes.push(FolderNode {
            id: folder.id,
            name: folder.name.clone(),
            parent_id: folder.parent_id,
            depth: parent_path.len(),
            path,
            children,
        });
    }
    nodes
}

fn sibling_order(a: &Folder, b: &Folder) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}
