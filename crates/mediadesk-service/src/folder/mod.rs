//! Folder collection, validated folder operations, and picker trees.

pub mod service;
pub mod store;
pub mod tree;

pub use service::{CreateFolderRequest, DeleteOutcome, FolderService, MoveFolderRequest};
pub use store::FolderStore;
pub use tree::{FolderSource, FolderTreeBuilder};
