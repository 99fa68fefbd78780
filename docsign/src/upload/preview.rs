//! Revocable local references to file content.
//!
//! A preview reference is a `blob:` style key that resolves to the file's
//! content until it is revoked. Each live reference pins the content in
//! memory, so every reference handed out must eventually be revoked.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;

use crate::file::FileHandle;

const SCHEME_PREFIX: &str = "blob:docsign/";

/// Issues and tracks preview references.
///
/// Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<RegistryInner>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    next: AtomicU64,
    live: Mutex<HashMap<String, Bytes>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new reference to the file's content.
    pub fn create(&self, file: &FileHandle) -> String {
        let n = self.inner.next.fetch_add(1, Ordering::Relaxed) + 1;
        let url = format!("{}{}", SCHEME_PREFIX, n);
        self.inner
            .live
            .lock()
            .insert(url.clone(), file.content().clone());
        url
    }

    /// Content behind a live reference.
    pub fn resolve(&self, url: &str) -> Option<Bytes> {
        self.inner.live.lock().get(url).cloned()
    }

    /// Revoke a reference. Unknown references are ignored.
    ///
    /// Returns true if the reference was live.
    pub fn revoke(&self, url: &str) -> bool {
        self.inner.live.lock().remove(url).is_some()
    }

    /// Number of references not yet revoked.
    pub fn live_count(&self) -> usize {
        self.inner.live.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_resolve_revoke() {
        let registry = PreviewRegistry::new();
        let file = FileHandle::new("a.pdf", b"%PDF".to_vec());

        let url = registry.create(&file);
        assert!(url.starts_with("blob:docsign/"));
        assert_eq!(registry.resolve(&url).unwrap().as_ref(), b"%PDF");
        assert_eq!(registry.live_count(), 1);

        assert!(registry.revoke(&url));
        assert!(registry.resolve(&url).is_none());
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn test_revoke_unknown_is_noop() {
        let registry = PreviewRegistry::new();
        assert!(!registry.revoke("blob:docsign/404"));
    }

    #[test]
    fn test_references_are_distinct() {
        let registry = PreviewRegistry::new();
        let file = FileHandle::new("a.pdf", vec![1]);

        let first = registry.create(&file);
        let second = registry.create(&file);

        assert_ne!(first, second);
        assert_eq!(registry.clone().live_count(), 2);
    }
}
