//! Core type definitions used across the MediaDesk workspace.

pub mod id;
pub mod pagination;

pub use id::{FileId, FolderId};
pub use pagination::{PageRequest, Pagination};
