//! # mediadesk-core
//!
//! Core crate for MediaDesk. Contains the key-value and blob store traits,
//! configuration schemas, typed identifiers, pagination types, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other MediaDesk crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
