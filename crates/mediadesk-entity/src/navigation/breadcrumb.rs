//! Breadcrumb entries.

use serde::{Deserialize, Serialize};

use mediadesk_core::types::FolderId;

use crate::folder::Folder;

/// Display name of the root sentinel.
pub const ROOT_NAME: &str = "Root";

/// One step of the path from root to the current folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Folder id; `None` for the root sentinel.
    pub id: Option<FolderId>,
    /// Display name.
    pub name: String,
}

impl Breadcrumb {
    /// The root sentinel.
    pub fn root() -> Self {
        Self {
            id: None,
            name: ROOT_NAME.to_string(),
        }
    }

    /// A breadcrumb for a folder.
    pub fn folder(id: FolderId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// Whether this is the root sentinel.
    pub fn is_root(&self) -> bool {
        self.id.is_none()
    }
}

impl From<&Folder> for Breadcrumb {
    fn from(folder: &Folder) -> Self {
        Self::folder(folder.id, folder.name.clone())
    }
}
