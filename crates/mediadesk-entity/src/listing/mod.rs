//! Directory listing entities.

pub mod entry;

pub use entry::{DirectoryEntry, DirectoryListing};
