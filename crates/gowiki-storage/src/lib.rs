//! Page store abstraction for gowiki.
//!
//! This crate provides a [`Storage`] trait for loading and saving wiki pages by title,
//! independent of where the bytes actually live. This enables:
//!
//! - **Unit testing** handlers without touching the real filesystem
//! - **Backend flexibility** (flat files today, a key-value store tomorrow)
//! - **Clean separation** between HTTP handling and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Page`], the title + body record the wiki manages
//! - [`Storage`] trait with `load()` and `save()` methods
//! - [`StorageError`] with a semantic [`StorageErrorKind`]
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! The filesystem backend lives in the `gowiki-storage-fs` crate.
//!
//! # Example
//!
//! ```ignore
//! use gowiki_storage::{Page, Storage};
//!
//! storage.save(&Page::new("FrontPage", "Welcome!"))?;
//! let page = storage.load("FrontPage")?;
//! assert_eq!(page.body, b"Welcome!");
//! ```

#[cfg(feature = "mock")]
mod mock;
mod page;
mod storage;

#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use page::{Page, is_valid_title};
pub use storage::{Storage, StorageError, StorageErrorKind};
