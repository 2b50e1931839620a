//! Breadcrumb navigation entities.

pub mod breadcrumb;

pub use breadcrumb::Breadcrumb;
