//! File entity model.

use serde::{Deserialize, Serialize};

use mediadesk_core::types::FolderId;

pub use mediadesk_core::traits::blob::FileRecord;

/// A Blob Store file as it appears inside a folder listing.
///
/// The remote record is kept untouched; `display_name` carries the local
/// rename overlay when one exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayFile {
    /// The remote record.
    #[serde(flatten)]
    pub record: FileRecord,
    /// Name to show, after applying the rename overlay.
    pub display_name: String,
    /// Folder the file is placed in (`None` for root).
    pub folder_id: Option<FolderId>,
}

impl DisplayFile {
    /// Decorate a remote record.
    pub fn new(record: FileRecord, rename: Option<&str>, folder_id: Option<FolderId>) -> Self {
        let display_name = rename
            .map(str::to_string)
            .unwrap_or_else(|| record.remote_name().to_string());
        Self {
            record,
            display_name,
            folder_id,
        }
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.display_name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.display_name)
            .map(|ext| ext.to_lowercase())
    }

    /// Whether the display name differs from the remote one.
    pub fn is_renamed(&self) -> bool {
        self.display_name != self.record.remote_name()
    }
}
