//! Persistence adapter
//!
//! The whole catalog is loaded and saved as one JSON document. A store never
//! appends: every `save` replaces what was there before.

mod record;

use crate::error::StorageError;
use crate::types::Book;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Abstract catalog store
pub trait CatalogStore: Send + Sync {
    /// Load every stored book, in stored order
    fn load(&self) -> StorageResult<Vec<Book>>;

    /// Replace the stored collection with `books`
    fn save(&self, books: &[Book]) -> StorageResult<()>;
}

impl<T: CatalogStore + ?Sized> CatalogStore for Arc<T> {
    fn load(&self) -> StorageResult<Vec<Book>> {
        (**self).load()
    }

    fn save(&self, books: &[Book]) -> StorageResult<()> {
        (**self).save(books)
    }
}

/// Catalog stored as a JSON file on the local filesystem
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open the store at `path`, creating parent directories and an empty
    /// catalog file if nothing exists there yet
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let store = Self { path: path.into() };
        store.ensure_parent()?;
        if !store.path.exists() {
            fs::write(&store.path, "[]")?;
            tracing::debug!(path = %store.path.display(), "Created empty catalog file");
        }
        Ok(store)
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> StorageResult<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::create_dir_all(parent)?),
            _ => Ok(()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "catalog.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CatalogStore for JsonFileStore {
    fn load(&self) -> StorageResult<Vec<Book>> {
        match fs::read(&self.path) {
            Ok(data) => record::decode(&data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes to a temp file then renames it over the catalog so a crash
    /// mid-write never leaves a truncated document behind
    fn save(&self, books: &[Book]) -> StorageResult<()> {
        let data = record::encode(books)?;
        self.ensure_parent()?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, &data)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), books = books.len(), "Saved catalog");
        Ok(())
    }
}

/// In-memory catalog store (for testing and embedding)
///
/// Uses the same JSON encoding as [`JsonFileStore`] and counts saves so
/// callers can observe when the catalog was written.
pub struct MemoryStore {
    data: Mutex<Vec<u8>>,
    saves: AtomicUsize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            data: Mutex::new(b"[]".to_vec()),
            saves: AtomicUsize::new(0),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw stored content
    pub fn from_contents(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Mutex::new(contents.into()),
            saves: AtomicUsize::new(0),
        }
    }

    /// Current stored document
    pub fn contents(&self) -> String {
        let data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&data).into_owned()
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl CatalogStore for MemoryStore {
    fn load(&self) -> StorageResult<Vec<Book>> {
        let data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        record::decode(&data)
    }

    fn save(&self, books: &[Book]) -> StorageResult<()> {
        let encoded = record::encode(books)?;
        *self.data.lock().unwrap_or_else(PoisonError::into_inner) = encoded;
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
