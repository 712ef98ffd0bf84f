//! Catalog service: registration, circulation, discovery and bulk operations

use crate::config::AppConfig;
use crate::defaults::default_catalog;
use crate::error::{LibraryError, Result};
use crate::isbn::normalize_isbn;
use crate::repository::CatalogRepository;
use crate::storage::JsonFileStore;
use crate::types::{AuthorCount, Book, CatalogEntry};
use indexmap::IndexMap;

/// Business operations over a [`CatalogRepository`]
///
/// Every mutating call persists immediately when `autosave` is on, except
/// [`import_catalog`](Self::import_catalog) and [`reset_catalog`](Self::reset_catalog),
/// which always write.
pub struct CatalogService {
    repository: CatalogRepository,
    autosave: bool,
}

impl CatalogService {
    /// Open the JSON catalog named by `config` and seed missing defaults
    pub fn open(config: &AppConfig) -> Result<Self> {
        let store = JsonFileStore::open(&config.data_file)?;
        let repository = CatalogRepository::open(store)?;
        Self::with_repository(repository, config.autosave)
    }

    /// Wrap an existing repository and seed missing defaults
    pub fn with_repository(repository: CatalogRepository, autosave: bool) -> Result<Self> {
        let mut service = Self {
            repository,
            autosave,
        };
        service.initialize_defaults()?;
        Ok(service)
    }

    pub fn autosave(&self) -> bool {
        self.autosave
    }

    // Catalog management

    /// Register a new book
    pub fn register_book(&mut self, isbn: &str, title: &str, author: &str) -> Result<Book> {
        let book = Book::new(normalize_isbn(isbn), title.trim(), author.trim());
        let book = self.repository.add(book, self.autosave)?;
        tracing::info!(isbn = %book.isbn, title = %book.title, "Registered book");
        Ok(book)
    }

    /// Remove a book entirely from the catalog
    pub fn remove_book(&mut self, isbn: &str) -> Result<Book> {
        let book = self.repository.remove(isbn, self.autosave)?;
        tracing::info!(isbn = %book.isbn, "Removed book");
        Ok(book)
    }

    /// List all books, optionally only those on the shelf
    pub fn list_books(&self, available_only: bool) -> Vec<Book> {
        if available_only {
            self.repository.find_available()
        } else {
            self.repository.list()
        }
    }

    pub fn get_book(&self, isbn: &str) -> Result<Book> {
        self.repository.get(isbn)
    }

    // Circulation

    /// Check a book out to `borrower`
    pub fn borrow_book(&mut self, isbn: &str, borrower: &str) -> Result<Book> {
        let mut book = self.repository.get(isbn)?;
        if let Some(current) = book.borrower() {
            return Err(LibraryError::Unavailable(format!(
                "Book '{}' is already borrowed by {}.",
                book.title, current
            )));
        }
        book.checkout(borrower);
        self.repository.update(book.clone(), self.autosave)?;
        tracing::info!(isbn = %book.isbn, borrower, "Borrowed book");
        Ok(book)
    }

    /// Return a checked-out book
    pub fn return_book(&mut self, isbn: &str) -> Result<Book> {
        let mut book = self.repository.get(isbn)?;
        if book.is_available() {
            return Err(LibraryError::Unavailable(format!(
                "Book '{}' is not currently borrowed.",
                book.title
            )));
        }
        book.checkin();
        self.repository.update(book.clone(), self.autosave)?;
        tracing::info!(isbn = %book.isbn, "Returned book");
        Ok(book)
    }

    // Discovery

    /// Books whose title contains `fragment`, case-insensitive
    pub fn search_by_title(&self, fragment: &str) -> Vec<Book> {
        let fragment = fragment.to_lowercase();
        self.repository
            .snapshot()
            .into_iter()
            .filter(|book| book.title.to_lowercase().contains(&fragment))
            .collect()
    }

    /// Books whose author contains `fragment`, case-insensitive
    pub fn search_by_author(&self, fragment: &str) -> Vec<Book> {
        self.repository.find_by_author(fragment)
    }

    // Reporting

    /// Number of books per exact author string, in encounter order
    pub fn usage_summary(&self) -> Vec<AuthorCount> {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for book in self.repository.snapshot() {
            *counts.entry(book.author).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(author, count)| AuthorCount { author, count })
            .collect()
    }

    // Bulk operations

    /// Replace the entire catalog with `entries`
    ///
    /// This is destructive: existing books, including their borrow state, are
    /// dropped rather than merged. Entries sharing a normalized ISBN collapse
    /// to the last one; the returned books are the ones actually stored.
    pub fn import_catalog(&mut self, entries: Vec<CatalogEntry>) -> Result<Vec<Book>> {
        let submitted = entries.len();
        self.repository.save_all(entries.into_iter().map(|entry| {
            Book::new(
                normalize_isbn(&entry.isbn),
                entry.title.trim(),
                entry.author.trim(),
            )
        }))?;
        let imported = self.repository.snapshot();
        tracing::info!(submitted, books = imported.len(), "Imported catalog");
        Ok(imported)
    }

    /// Clear the catalog; always persisted
    pub fn reset_catalog(&mut self) -> Result<()> {
        self.repository.save_all(Vec::new())?;
        tracing::info!("Catalog cleared");
        Ok(())
    }

    /// Write pending changes when running without autosave
    pub fn flush(&self) -> Result<()> {
        self.repository.persist()
    }

    /// Top up the catalog with any default entry whose ISBN is missing
    fn initialize_defaults(&mut self) -> Result<()> {
        let missing: Vec<CatalogEntry> = default_catalog()
            .into_iter()
            .filter(|entry| !self.repository.contains(&entry.isbn))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }

        tracing::debug!(count = missing.len(), "Seeding default books");
        for entry in missing {
            let book = Book::new(normalize_isbn(&entry.isbn), entry.title, entry.author);
            self.repository.add(book, self.autosave)?;
        }
        Ok(())
    }
}
