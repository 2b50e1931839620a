//! Directory listing and folder tree configuration.

use serde::{Deserialize, Serialize};

/// Directory listing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Page size used when walking the Blob Store.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Folder tree builder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum number of sibling fetches in flight per level.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
        }
    }
}

fn default_page_size() -> u64 {
    100
}

fn default_max_concurrency() -> usize {
    8
}
