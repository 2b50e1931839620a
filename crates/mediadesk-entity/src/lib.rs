//! # mediadesk-entity
//!
//! Domain entity models for MediaDesk. Folders are persisted as JSON in
//! the key-value store; files are owned by the Blob Store and decorated
//! locally with a folder assignment and an optional display name.

pub mod file;
pub mod folder;
pub mod listing;
pub mod navigation;
