//! Core traits defined in `mediadesk-core` and implemented by other crates.

pub mod blob;
pub mod kv;

pub use blob::{BlobListParams, BlobPage, BlobStore, BlobUpload, FileRecord};
pub use kv::KeyValueStore;
