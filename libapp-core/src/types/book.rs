//! The Book type - the single entity of the catalog

use chrono::{DateTime, Utc};

/// A book entry in the catalog
///
/// `borrower` and `borrowed_at` are always set and cleared together; they are
/// only reachable through [`Book::checkout`] and [`Book::checkin`].
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    /// ISBN, normalized once the book is stored in a repository
    pub isbn: String,

    /// Display title
    pub title: String,

    /// Display author
    pub author: String,

    /// When the book entered the catalog
    pub added_at: DateTime<Utc>,

    pub(crate) borrower: Option<String>,
    pub(crate) borrowed_at: Option<DateTime<Utc>>,
}

impl Book {
    /// Create an available book, stamped with the current time
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            added_at: Utc::now(),
            borrower: None,
            borrowed_at: None,
        }
    }

    /// Override the creation timestamp
    pub fn with_added_at(mut self, added_at: DateTime<Utc>) -> Self {
        self.added_at = added_at;
        self
    }

    /// Mark the book as borrowed by the given person
    pub fn checkout(&mut self, borrower: impl Into<String>) {
        self.borrower = Some(borrower.into());
        self.borrowed_at = Some(Utc::now());
    }

    /// Return the book to the shelf
    pub fn checkin(&mut self) {
        self.borrower = None;
        self.borrowed_at = None;
    }

    /// A book is available when nobody has it checked out
    pub fn is_available(&self) -> bool {
        self.borrower.is_none()
    }

    pub fn borrower(&self) -> Option<&str> {
        self.borrower.as_deref()
    }

    pub fn borrowed_at(&self) -> Option<DateTime<Utc>> {
        self.borrowed_at
    }
}
