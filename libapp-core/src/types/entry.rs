//! Input and report records

use serde::{Deserialize, Serialize};

/// An `(isbn, title, author)` triple as accepted by registration and import
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub isbn: String,
    pub title: String,
    pub author: String,
}

impl CatalogEntry {
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
        }
    }

    /// Reject entries with a blank title or author, or an ISBN with no
    /// alphanumeric characters
    pub fn validate(&self) -> std::result::Result<(), String> {
        if crate::normalize_isbn(&self.isbn).is_empty() {
            return Err(format!("Invalid ISBN: '{}'", self.isbn));
        }
        if self.title.trim().is_empty() {
            return Err("Title must not be empty".to_string());
        }
        if self.author.trim().is_empty() {
            return Err("Author must not be empty".to_string());
        }
        Ok(())
    }
}

/// Number of catalog entries written by one author
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorCount {
    pub author: String,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(CatalogEntry::new("1", "One", "Author").validate().is_ok());
        assert!(CatalogEntry::new("--", "One", "Author").validate().is_err());
        assert!(CatalogEntry::new("1", "  ", "Author").validate().is_err());
        assert!(CatalogEntry::new("1", "One", "").validate().is_err());
    }

    #[test]
    fn test_entry_deserialization() {
        let entry: CatalogEntry =
            serde_json::from_str(r#"{"isbn":"1","title":"One","author":"A"}"#).unwrap();
        assert_eq!(entry, CatalogEntry::new("1", "One", "A"));
        assert!(serde_json::from_str::<CatalogEntry>(r#"{"isbn":"1"}"#).is_err());
    }
}
