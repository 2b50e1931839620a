//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mediadesk_core::types::FolderId;

/// A client-synthesized folder in the virtual hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (`None` for folders directly under root).
    #[serde(default)]
    pub parent_id: Option<FolderId>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
    /// Number of child folders and mapped files.
    ///
    /// Derived on every listing; the persisted value is never trusted.
    #[serde(default)]
    pub item_count: u64,
}

impl Folder {
    /// Create a new folder with a fresh id and timestamps.
    pub fn new(name: impl Into<String>, parent_id: Option<FolderId>) -> Self {
        let now = Utc::now();
        Self {
            id: FolderId::new(),
            name: name.into(),
            parent_id,
            created_at: now,
            updated_at: now,
            item_count: 0,
        }
    }

    /// Check if this folder sits directly under root.
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Partial update applied to a folder.
///
/// `parent_id` uses a nested option: `None` leaves the parent untouched,
/// `Some(None)` moves the folder to root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateFolder {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New parent.
    #[serde(default)]
    pub parent_id: Option<Option<FolderId>>,
}

impl UpdateFolder {
    /// An update that only renames.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            parent_id: None,
        }
    }

    /// An update that only re-parents.
    pub fn reparent(parent_id: Option<FolderId>) -> Self {
        Self {
            name: None,
            parent_id: Some(parent_id),
        }
    }

    /// Merge this update into `folder`, refreshing `updated_at`.
    pub fn apply_to(self, folder: &mut Folder) {
        if let Some(name) = self.name {
            folder.name = name;
        }
        if let Some(parent_id) = self.parent_id {
            folder.parent_id = parent_id;
        }
        folder.updated_at = Utc::now();
    }
}
