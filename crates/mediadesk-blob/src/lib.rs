//! # mediadesk-blob
//!
//! Blob Store clients for MediaDesk. The Blob Store is a flat file API
//! with no notion of folders; these providers only list, upload, and
//! delete records.
//!
//! - **memory**: process-local store used for development and tests
//! - **http**: REST client for the dashboard's media API

pub mod manager;
pub mod providers;

pub use manager::BlobStoreManager;
