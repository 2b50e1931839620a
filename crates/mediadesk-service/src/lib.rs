//! # mediadesk-service
//!
//! Service layer for MediaDesk's virtual folder hierarchy. The Blob Store
//! only knows a flat list of files; these services keep a folder tree and
//! per-file overlays in the key-value store and merge them into browsable
//! listings.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod file;
pub mod folder;
pub mod listing;
pub mod navigation;
pub mod overlay;

#[cfg(test)]
mod testing;

pub use context::ServiceContext;
pub use file::{FileService, MoveFilesRequest};
pub use folder::{
    CreateFolderRequest, DeleteOutcome, FolderService, FolderStore, FolderTreeBuilder,
    MoveFolderRequest,
};
pub use listing::DirectoryListingService;
pub use navigation::{BrowserSession, Navigator, RequestSequencer};
pub use overlay::OverlayStore;
