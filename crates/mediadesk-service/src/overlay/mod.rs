//! File overlays: folder assignments and display names.

pub mod store;

pub use store::{FolderMappings, NameOverrides, OverlayStore};
