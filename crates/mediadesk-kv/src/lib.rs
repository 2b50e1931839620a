//! # mediadesk-kv
//!
//! Key-value store providers for MediaDesk. The folder collection and the
//! overlay maps live here as JSON documents. Supports three backends:
//!
//! - **memory**: process-local map using [dashmap](https://crates.io/crates/dashmap)
//! - **file**: one JSON document per key in a data directory
//! - **redis**: Redis-backed store using the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at runtime based on configuration.

#[cfg(feature = "file")]
pub mod file;
pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use keys::KeySpace;
pub use provider::KvManager;
