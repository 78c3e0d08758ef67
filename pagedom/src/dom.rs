//! Shared document handle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::document::Document;

/// Shared, mutable handle to a [`Document`].
///
/// Cheap to clone and safe to use across async task boundaries; controllers
/// keep a clone and patch the tree from completion callbacks. A dirty flag
/// records that something changed since the host last redrew.
#[derive(Debug)]
pub struct Dom {
    inner: Arc<RwLock<Document>>,
    dirty: Arc<AtomicBool>,
}

impl Dom {
    pub fn new(document: Document) -> Self {
        Self {
            inner: Arc::new(RwLock::new(document)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Read the document through a closure.
    pub fn with<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        match self.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    /// Mutate the document through a closure and mark the tree dirty.
    pub fn update<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let result = match self.inner.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        };
        self.dirty.store(true, Ordering::SeqCst);
        result
    }

    /// Check if the document has been modified since last check
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for Dom {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}
