//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::page::Page;
use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory page store for testing.
///
/// Use the builder methods to seed pages and to make saves fail.
///
/// # Example
///
/// ```ignore
/// use gowiki_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new().with_page("Alpha", "hello");
/// assert_eq!(storage.load("Alpha").unwrap().body, b"hello");
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    pages: RwLock<HashMap<String, Vec<u8>>>,
    read_only: AtomicBool,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a page.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.pages.write().unwrap().insert(title.into(), body.into());
        self
    }

    /// Make every subsequent `save` fail with `PermissionDenied`.
    #[must_use]
    pub fn read_only(self) -> Self {
        self.set_read_only(true);
        self
    }

    /// Toggle write refusal at runtime.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Raw body stored under `title`, bypassing the trait.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn body(&self, title: &str) -> Option<Vec<u8>> {
        self.pages.read().unwrap().get(title).cloned()
    }

    /// Number of stored pages.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.read().unwrap().len()
    }

    /// True when no pages are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MockStorage {
    fn load(&self, title: &str) -> Result<Page, StorageError> {
        let pages = self.pages.read().unwrap();
        pages
            .get(title)
            .map(|body| Page::new(title, body.clone()))
            .ok_or_else(|| StorageError::not_found(title).with_backend(BACKEND))
    }

    fn save(&self, page: &Page) -> Result<(), StorageError> {
        if self.read_only.load(Ordering::SeqCst) {
            tracing::debug!(title = %page.title, "Refusing save on read-only storage");
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(&page.title)
                .with_backend(BACKEND)
                .with_source(std::io::Error::new(
                    std::io::ErrorKind::ReadOnlyFilesystem,
                    "read-only storage",
                )));
        }
        self.pages
            .write()
            .unwrap()
            .insert(page.title.clone(), page.body.clone());
        tracing::debug!(title = %page.title, bytes = page.body.len(), "Stored page in memory");
        Ok(())
    }
}
