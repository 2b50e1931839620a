//! Folder tree structures for the move-target picker.

use serde::{Deserialize, Serialize};

use mediadesk_core::types::FolderId;

/// A node in a folder tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder ID.
    pub parent_id: Option<FolderId>,
    /// Names from the top-level ancestor down to this folder.
    pub path: Vec<String>,
    /// Depth level (0 for folders directly under root).
    pub depth: usize,
    /// Child folder nodes, sorted by name.
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// The resolved path joined with `/`, used to tell same-named folders apart.
    pub fn display_path(&self) -> String {
        format!("/{}", self.path.join("/"))
    }
}

/// A forest of folders rooted at the virtual root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FolderTree {
    /// The top-level node(s) of the tree.
    pub roots: Vec<FolderNode>,
    /// Total number of folders in the tree.
    pub total_folders: u64,
}

impl FolderTree {
    /// Create an empty folder tree.
    pub fn empty() -> Self {
        Self {
            roots: Vec::new(),
            total_folders: 0,
        }
    }

    /// Depth-first, pre-order iteration over every node.
    pub fn iter(&self) -> impl Iterator<Item = &FolderNode> {
        let mut stack: Vec<&FolderNode> = self.roots.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Every folder id in the tree.
    pub fn ids(&self) -> Vec<FolderId> {
        self.iter().map(|n| n.id).collect()
    }

    /// Find a node by id.
    pub fn find(&self, id: FolderId) -> Option<&FolderNode> {
        self.iter().find(|n| n.id == id)
    }
}
