//! Directory listings.

pub mod service;

pub use service::DirectoryListingService;
