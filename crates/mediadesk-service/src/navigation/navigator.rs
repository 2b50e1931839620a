//! Breadcrumb navigation state.

use std::sync::Arc;

use tracing::debug;

use mediadesk_core::types::FolderId;
use mediadesk_entity::navigation::Breadcrumb;

use crate::folder::FolderStore;

/// Tracks the breadcrumb trail of the folder being browsed.
///
/// The first breadcrumb is always the root sentinel.
#[derive(Debug, Clone)]
pub struct Navigator {
    folders: Arc<FolderStore>,
    stack: Vec<Breadcrumb>,
}

impl Navigator {
    /// A navigator positioned at root.
    pub fn new(folders: Arc<FolderStore>) -> Self {
        Self {
            folders,
            stack: vec![Breadcrumb::root()],
        }
    }

    /// Breadcrumbs from root to the current folder.
    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        &self.stack
    }

    /// The current folder (`None` at root).
    pub fn current(&self) -> Option<FolderId> {
        self.stack.last().and_then(|b| b.id)
    }

    /// Open a folder.
    ///
    /// If it is already on the trail the trail is cut back to it. Otherwise
    /// the trail is rebuilt from the stored ancestor chain; a folder the
    /// store does not know is pushed directly under root.
    pub async fn navigate_into(&mut self, folder_id: FolderId, folder_name: &str) {
        if let Some(pos) = self.stack.iter().position(|b| b.id == Some(folder_id)) {
            self.stack.truncate(pos + 1);
            return;
        }

        let path = self.folders.path_to(folder_id).await;
        self.stack.truncate(1);
        if path.is_empty() {
            debug!(folder_id = %folder_id, "Folder has no stored path; placing under root");
            self.stack.push(Breadcrumb::folder(folder_id, folder_name));
        } else {
            self.stack.extend(path.iter().map(Breadcrumb::from));
        }
    }

    /// Go to the parent folder. No-op at root.
    pub fn navigate_up(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Jump to the breadcrumb at `index`. Out-of-range indexes stay put.
    pub fn navigate_to_index(&mut self, index: usize) {
        self.stack.truncate(index.saturating_add(1).max(1));
    }

    /// Go back to root.
    pub fn navigate_root(&mut self) {
        self.stack.truncate(1);
    }
}
