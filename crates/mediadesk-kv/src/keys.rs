//! Key builders for every document MediaDesk persists.
//!
//! Centralising key construction keeps the namespacing in one place and
//! makes it easy to find every key the application uses.

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "mediadesk";

/// Namespaced key builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpace {
    namespace: String,
}

impl KeySpace {
    /// Create a key space under `namespace`.
    pub fn new(namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let namespace = if namespace.trim().is_empty() {
            DEFAULT_NAMESPACE.to_string()
        } else {
            namespace
        };
        Self { namespace }
    }

    /// The namespace prefix.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    // ── Folder hierarchy ───────────────────────────────────────

    /// Key of the folder collection (`Vec<Folder>`).
    pub fn folders(&self) -> String {
        format!("{}:folders", self.namespace)
    }

    // ── File overlays ──────────────────────────────────────────

    /// Key of the file → folder assignment map.
    pub fn file_folder_map(&self) -> String {
        format!("{}:file_folder_map", self.namespace)
    }

    /// Key of the file display-name override map.
    pub fn file_names(&self) -> String {
        format!("{}:file_names", self.namespace)
    }
}

impl Default for KeySpace {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}
