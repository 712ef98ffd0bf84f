//! Catalog repository
//!
//! Owns the in-memory `normalized ISBN -> Book` map for the lifetime of the
//! process. The map is loaded once from a [`CatalogStore`] and written back
//! in full whenever a mutating call asks for it.

use crate::error::{LibraryError, Result};
use crate::isbn::normalize_isbn;
use crate::storage::CatalogStore;
use crate::types::Book;
use indexmap::IndexMap;

/// In-memory catalog backed by a [`CatalogStore`]
pub struct CatalogRepository {
    store: Box<dyn CatalogStore>,
    books: IndexMap<String, Book>,
}

impl CatalogRepository {
    /// Load the catalog from `store`
    ///
    /// Records sharing a normalized ISBN collapse to the last one read.
    pub fn open(store: impl CatalogStore + 'static) -> Result<Self> {
        let mut books = IndexMap::new();
        for mut book in store.load()? {
            let key = normalize_isbn(&book.isbn);
            book.isbn = key.clone();
            books.insert(key, book);
        }
        tracing::debug!(books = books.len(), "Loaded catalog");

        Ok(Self {
            store: Box::new(store),
            books,
        })
    }

    /// Write the whole catalog to the store
    pub fn persist(&self) -> Result<()> {
        let books: Vec<Book> = self.books.values().cloned().collect();
        self.store.save(&books)?;
        Ok(())
    }

    fn persist_if(&self, autosave: bool) -> Result<()> {
        if autosave {
            self.persist()
        } else {
            Ok(())
        }
    }

    pub fn get(&self, isbn: &str) -> Result<Book> {
        self.books
            .get(&normalize_isbn(isbn))
            .cloned()
            .ok_or_else(|| LibraryError::not_found(isbn))
    }

    pub fn contains(&self, isbn: &str) -> bool {
        self.books.contains_key(&normalize_isbn(isbn))
    }

    /// Insert a new book under its normalized ISBN
    pub fn add(&mut self, mut book: Book, autosave: bool) -> Result<Book> {
        let key = normalize_isbn(&book.isbn);
        if self.books.contains_key(&key) {
            return Err(LibraryError::already_exists(&book.isbn));
        }
        book.isbn = key.clone();
        self.books.insert(key, book.clone());
        self.persist_if(autosave)?;
        Ok(book)
    }

    /// Delete a book, returning what was stored
    pub fn remove(&mut self, isbn: &str, autosave: bool) -> Result<Book> {
        let book = self
            .books
            .shift_remove(&normalize_isbn(isbn))
            .ok_or_else(|| LibraryError::not_found(isbn))?;
        self.persist_if(autosave)?;
        Ok(book)
    }

    /// Replace an existing book; this is not an upsert
    pub fn update(&mut self, mut book: Book, autosave: bool) -> Result<()> {
        let key = normalize_isbn(&book.isbn);
        let slot = self
            .books
            .get_mut(&key)
            .ok_or_else(|| LibraryError::not_found(&book.isbn))?;
        book.isbn = key;
        *slot = book;
        self.persist_if(autosave)
    }

    /// All books, oldest first
    pub fn list(&self) -> Vec<Book> {
        let mut books = self.snapshot();
        books.sort_by_key(|book| book.added_at);
        books
    }

    /// Case-insensitive substring match on the author, oldest first
    pub fn find_by_author(&self, fragment: &str) -> Vec<Book> {
        let fragment = fragment.to_lowercase();
        self.list()
            .into_iter()
            .filter(|book| book.author.to_lowercase().contains(&fragment))
            .collect()
    }

    /// Books nobody has checked out, oldest first
    pub fn find_available(&self) -> Vec<Book> {
        self.list()
            .into_iter()
            .filter(Book::is_available)
            .collect()
    }

    /// All books in map order
    pub fn snapshot(&self) -> Vec<Book> {
        self.books.values().cloned().collect()
    }

    /// Replace the whole catalog and persist it, regardless of autosave
    pub fn save_all(&mut self, books: impl IntoIterator<Item = Book>) -> Result<()> {
        self.books = books
            .into_iter()
            .map(|mut book| {
                book.isbn = normalize_isbn(&book.isbn);
                (book.isbn.clone(), book)
            })
            .collect();
        self.persist()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
