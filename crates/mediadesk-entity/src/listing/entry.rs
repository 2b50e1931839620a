//! Entries of a merged folder + file listing.

use serde::{Deserialize, Serialize};

use mediadesk_core::types::FolderId;

use crate::file::DisplayFile;
use crate::folder::Folder;

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DirectoryEntry {
    /// A child folder with its derived item count.
    Folder(Folder),
    /// A file placed in the listed folder.
    File(DisplayFile),
}

impl DirectoryEntry {
    /// The name shown for this entry.
    pub fn name(&self) -> &str {
        match self {
            Self::Folder(f) => &f.name,
            Self::File(f) => &f.display_name,
        }
    }

    /// Whether this entry is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }

    /// The folder, if this entry is one.
    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Self::Folder(f) => Some(f),
            Self::File(_) => None,
        }
    }

    /// The file, if this entry is one.
    pub fn as_file(&self) -> Option<&DisplayFile> {
        match self {
            Self::File(f) => Some(f),
            Self::Folder(_) => None,
        }
    }
}

/// The contents of one folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryListing {
    /// The listed folder (`None` for root).
    pub folder_id: Option<FolderId>,
    /// Folders first, then files.
    pub entries: Vec<DirectoryEntry>,
    /// Set when the Blob Store could not be read; the listing then holds
    /// folders only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_error: Option<String>,
}

impl DirectoryListing {
    /// Child folders in listing order.
    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.entries.iter().filter_map(DirectoryEntry::as_folder)
    }

    /// Files in listing order.
    pub fn files(&self) -> impl Iterator<Item = &DisplayFile> {
        self.entries.iter().filter_map(DirectoryEntry::as_file)
    }

    /// Find a child folder by name.
    pub fn folder_named(&self, name: &str) -> Option<&Folder> {
        self.folders().find(|f| f.name == name)
    }

    /// Whether the listing is complete.
    pub fn is_degraded(&self) -> bool {
        self.blob_error.is_some()
    }
}
