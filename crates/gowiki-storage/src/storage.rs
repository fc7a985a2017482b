//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for loading and saving pages by title,
//! along with [`StorageError`] for unified error handling across backends.
//!
//! # Keys
//!
//! Every method is keyed by the page title alone (e.g. `"FrontPage"`).
//! Backends decide how a title maps to their own layout: the filesystem
//! backend uses `<title>.txt`, a key-value backend could use the title as-is.

use std::path::PathBuf;

use crate::page::Page;

/// Semantic error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// No page is stored under the title.
    NotFound,
    /// The backend refused access.
    PermissionDenied,
    /// The title cannot be used as a key by this backend.
    InvalidPath,
    /// The backend ran out of space.
    StorageFull,
    /// Other/unknown error category.
    Other,
}

impl StorageErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "Not found",
            Self::PermissionDenied => "Permission denied",
            Self::InvalidPath => "Invalid path",
            Self::StorageFull => "Storage full",
            Self::Other => "Error",
        }
    }
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    kind: StorageErrorKind,
    path: Option<PathBuf>,
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Create a not found error for a title or path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error, classifying it by kind.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied | std::io::ErrorKind::ReadOnlyFilesystem => {
                StorageErrorKind::PermissionDenied
            }
            std::io::ErrorKind::StorageFull => StorageErrorKind::StorageFull,
            _ => StorageErrorKind::Other,
        };
        let error = Self::new(kind).with_source(err);
        match path {
            Some(p) => error.with_path(p),
            None => error,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    /// Path context, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        self.path.as_deref()
    }

    /// Backend identifier, if any.
    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }

    /// True when the page simply does not exist yet.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // "[Backend] Kind: source (path: Title.txt)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        f.write_str(self.kind.as_str())?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Page store keyed by title.
///
/// Implementations are shared across concurrent requests behind an `Arc`,
/// and apply no locking of their own: two saves of the same title race and
/// the last one to complete wins.
pub trait Storage: Send + Sync {
    /// Load the page stored under `title`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] with kind [`StorageErrorKind::NotFound`] when
    /// no page exists yet, or another kind when the backend fails.
    fn load(&self, title: &str) -> Result<Page, StorageError>;

    /// Store `page`, fully replacing any previous body for its title.
    ///
    /// Readers never observe a partially written body.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on any backend failure (permission denied,
    /// disk full, invalid title).
    fn save(&self, page: &Page) -> Result<(), StorageError>;
}
