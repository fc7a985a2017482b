//! Filesystem storage backend for gowiki.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`Storage`](gowiki_storage::Storage) trait. Each page is one flat file:
//!
//! ```text
//! <pages_dir>/
//! ├── FrontPage.txt
//! └── TestPage.txt
//! ```
//!
//! The file holds the raw page body, with no metadata and no encoding marker.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use gowiki_storage::{Page, Storage};
//! use gowiki_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("data"));
//! storage.save(&Page::new("TestPage", "This is a sample Page!"))?;
//! let page = storage.load("TestPage")?;
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use gowiki_storage::{Page, Storage, StorageError, StorageErrorKind, is_valid_title};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Extension appended to the title to form the page file name.
const PAGE_EXTENSION: &str = "txt";

/// Filesystem page store.
///
/// Saves go through a temporary file in the same directory which is then
/// renamed over the page file, so a concurrent or later `load` sees either
/// the old body or the new one. Nothing coordinates concurrent saves of the
/// same title: the last rename wins.
#[derive(Debug, Clone)]
pub struct FsStorage {
    /// Directory holding the page files.
    pages_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `pages_dir`.
    ///
    /// The directory is not created here; saves fail until it exists.
    #[must_use]
    pub fn new(pages_dir: PathBuf) -> Self {
        Self { pages_dir }
    }

    /// Reject titles that are not plain ASCII alphanumerics.
    ///
    /// Keeps a title from ever naming a file outside `pages_dir`.
    fn validate_title(title: &str) -> Result<(), StorageError> {
        if !is_valid_title(title) {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(title)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Map a title to its page file (`<pages_dir>/<title>.txt`).
    fn page_path(&self, title: &str) -> PathBuf {
        self.pages_dir.join(format!("{title}.{PAGE_EXTENSION}"))
    }

    /// File name used in error context, relative to `pages_dir`.
    fn file_name(title: &str) -> PathBuf {
        PathBuf::from(format!("{title}.{PAGE_EXTENSION}"))
    }

    /// Write `body` to a temporary sibling and rename it over `target`.
    fn write_atomic(&self, title: &str, target: &Path, body: &[u8]) -> std::io::Result<()> {
        let mut tmp = tempfile::Builder::new()
            .prefix(&format!(".{title}."))
            .suffix(".tmp")
            .tempfile_in(&self.pages_dir)?;
        tmp.write_all(body)?;
        tmp.as_file().sync_all()?;
        // On failure the PersistError owns the temp file and deletes it on drop.
        tmp.persist(target).map_err(|e| e.error)?;
        Ok(())
    }
}

impl Storage for FsStorage {
    fn load(&self, title: &str) -> Result<Page, StorageError> {
        Self::validate_title(title)?;
        let path = self.page_path(title);
        let body = fs::read(&path)
            .map_err(|e| StorageError::io(e, Some(Self::file_name(title))).with_backend(BACKEND))?;
        tracing::debug!(title, bytes = body.len(), "Read page file");
        Ok(Page::new(title, body))
    }

    fn save(&self, page: &Page) -> Result<(), StorageError> {
        Self::validate_title(&page.title)?;
        let target = self.page_path(&page.title);
        self.write_atomic(&page.title, &target, &page.body)
            .map_err(|e| {
                StorageError::io(e, Some(Self::file_name(&page.title))).with_backend(BACKEND)
            })?;
        tracing::debug!(title = %page.title, bytes = page.body.len(), "Wrote page file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_storage_is_send_sync() {
        assert_send_sync::<FsStorage>();
    }

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    /// Names of all entries in `dir`, sorted.
    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_save_writes_title_txt() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        storage.save(&Page::new("Alpha", "hello")).unwrap();

        let content = fs::read(temp_dir.path().join("Alpha.txt")).unwrap();
        assert_eq!(content, b"hello");
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        storage.save(&Page::new("Alpha", "one")).unwrap();
        storage.save(&Page::new("Alpha", "two")).unwrap();

        assert_eq!(dir_entries(temp_dir.path()), vec!["Alpha.txt".to_owned()]);
    }

    #[test]
    fn test_load_existing_file() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("TestPage.txt"), "This is a sample Page!").unwrap();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let page = storage.load("TestPage").unwrap();

        assert_eq!(page, Page::new("TestPage", "This is a sample Page!"));
    }

    #[test]
    fn test_round_trip_empty_body() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        storage.save(&Page::empty("Blank")).unwrap();
        let page = storage.load("Blank").unwrap();

        assert!(page.body.is_empty());
    }

    #[test]
    fn test_round_trip_binary_body() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let body: Vec<u8> = (0..=255).collect();

        storage.save(&Page::new("Bytes", body.clone())).unwrap();
        let page = storage.load("Bytes").unwrap();

        assert_eq!(page.body, body);
    }

    #[test]
    fn test_save_overwrites_previous_body() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        storage.save(&Page::new("Alpha", "a much longer first body")).unwrap();
        storage.save(&Page::new("Alpha", "short")).unwrap();

        assert_eq!(storage.load("Alpha").unwrap().body, b"short");
    }

    #[test]
    fn test_save_twice_same_as_once() {
        let once_dir = create_test_dir();
        let twice_dir = create_test_dir();
        let once = FsStorage::new(once_dir.path().to_path_buf());
        let twice = FsStorage::new(twice_dir.path().to_path_buf());
        let page = Page::new("Alpha", "hello");

        once.save(&page).unwrap();
        twice.save(&page).unwrap();
        twice.save(&page).unwrap();

        assert_eq!(once.load("Alpha").unwrap(), twice.load("Alpha").unwrap());
        assert_eq!(dir_entries(once_dir.path()), dir_entries(twice_dir.path()));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.load("Missing").unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.backend(), Some("Fs"));
        assert_eq!(err.path(), Some(Path::new("Missing.txt")));
    }

    #[test]
    fn test_load_unreadable_is_not_not_found() {
        let temp_dir = create_test_dir();
        fs::create_dir(temp_dir.path().join("Gamma.txt")).unwrap();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.load("Gamma").unwrap_err();

        assert!(!err.is_not_found());
    }

    #[test]
    fn test_save_failure_leaves_no_partial_file() {
        let temp_dir = create_test_dir();
        // A directory squatting on the page file makes the final rename fail.
        fs::create_dir(temp_dir.path().join("Beta.txt")).unwrap();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.save(&Page::new("Beta", "data")).unwrap_err();

        assert_eq!(err.backend(), Some("Fs"));
        assert!(err.to_string().contains("Beta.txt"));
        assert_eq!(dir_entries(temp_dir.path()), vec!["Beta.txt".to_owned()]);
        assert!(temp_dir.path().join("Beta.txt").is_dir());
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().join("nope"));

        let result = storage.save(&Page::new("Alpha", "hello"));

        assert!(result.is_err());
        assert!(!temp_dir.path().join("nope").exists());
    }

    #[test]
    fn test_save_rejects_invalid_title() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.save(&Page::new("../escape", "x")).unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::InvalidPath);
        assert!(dir_entries(temp_dir.path()).is_empty());
    }

    #[test]
    fn test_load_rejects_invalid_title() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        for title in ["", "a/b", "../etc/passwd", "bad title"] {
            let err = storage.load(title).unwrap_err();
            assert_eq!(err.kind(), StorageErrorKind::InvalidPath, "title {title:?}");
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_save_creates_owner_only_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        storage.save(&Page::new("Private", "secret")).unwrap();

        let mode = fs::metadata(temp_dir.path().join("Private.txt"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_concurrent_saves_last_write_wins() {
        // No coordination between writers: the outcome is whichever rename
        // lands last, but never a mix of two bodies.
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let bodies: Vec<Vec<u8>> = (0..8u8).map(|i| vec![b'a' + i; 4096]).collect();

        std::thread::scope(|scope| {
            for body in &bodies {
                let storage = &storage;
                scope.spawn(move || {
                    storage.save(&Page::new("Race", body.clone())).unwrap();
                });
            }
        });

        let page = storage.load("Race").unwrap();
        assert!(bodies.contains(&page.body));
        assert_eq!(dir_entries(temp_dir.path()), vec!["Race.txt".to_owned()]);
    }
}
