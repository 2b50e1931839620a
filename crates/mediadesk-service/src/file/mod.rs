//! File placement, rename, upload, and delete operations.

pub mod service;

pub use service::{FileService, MoveFilesRequest};
