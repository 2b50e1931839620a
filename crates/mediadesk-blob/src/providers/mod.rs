//! Blob Store provider implementations.

#[cfg(feature = "http-client")]
pub mod http;
#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "http-client")]
pub use http::HttpBlobStore;
#[cfg(feature = "memory")]
pub use memory::MemoryBlobStore;
