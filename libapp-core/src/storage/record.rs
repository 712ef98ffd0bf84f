//! On-disk record layout
//!
//! The store is a JSON array of objects with the keys
//! `isbn, title, author, added_at, borrower, borrowed_at`. The borrower fields
//! are written as explicit `null` when the book is on the shelf.

use crate::error::StorageError;
use crate::types::Book;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct BookRecord {
    isbn: String,
    title: String,
    author: String,
    #[serde(with = "timestamp")]
    added_at: DateTime<Utc>,
    #[serde(default)]
    borrower: Option<String>,
    #[serde(default, with = "optional_timestamp")]
    borrowed_at: Option<DateTime<Utc>>,
}

impl From<&Book> for BookRecord {
    fn from(book: &Book) -> Self {
        Self {
            isbn: book.isbn.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            added_at: book.added_at,
            borrower: book.borrower.clone(),
            borrowed_at: book.borrowed_at,
        }
    }
}

impl TryFrom<BookRecord> for Book {
    type Error = StorageError;

    fn try_from(record: BookRecord) -> Result<Self, Self::Error> {
        if record.borrower.is_some() != record.borrowed_at.is_some() {
            return Err(StorageError::Malformed(format!(
                "book {} has a borrower without a borrow date (or the reverse)",
                record.isbn
            )));
        }
        Ok(Book {
            isbn: record.isbn,
            title: record.title,
            author: record.author,
            added_at: record.added_at,
            borrower: record.borrower,
            borrowed_at: record.borrowed_at,
        })
    }
}

/// Serialize the full collection as a pretty-printed JSON array
pub(crate) fn encode(books: &[Book]) -> Result<Vec<u8>, StorageError> {
    let records: Vec<BookRecord> = books.iter().map(BookRecord::from).collect();
    Ok(serde_json::to_vec_pretty(&records)?)
}

/// Parse a stored collection; blank content is an empty catalog
pub(crate) fn decode(data: &[u8]) -> Result<Vec<Book>, StorageError> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let records: Vec<BookRecord> = serde_json::from_slice(data)?;
    records.into_iter().map(Book::try_from).collect()
}

/// RFC 3339 timestamps, also accepting timezone-less ISO-8601 as UTC
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(value) => Ok(value.with_timezone(&Utc)),
            Err(err) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc())
                .map_err(|_| err),
        }
    }
}

mod optional_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => super::timestamp::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::timestamp::parse(&raw)
                .map(Some)
                .map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_available_book_writes_explicit_nulls() {
        let added_at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let book = Book::new("123", "Title", "Author").with_added_at(added_at);
        let json: serde_json::Value = serde_json::from_slice(&encode(&[book]).unwrap()).unwrap();

        let record = &json[0];
        assert_eq!(record["isbn"], "123");
        assert_eq!(record["added_at"], "2024-01-02T03:04:05Z");
        assert!(record["borrower"].is_null());
        assert!(record["borrowed_at"].is_null());
        assert_eq!(record.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_subsecond_precision_survives() {
        let mut book = Book::new("1", "T", "A");
        book.checkout("Alice");
        let decoded = decode(&encode(std::slice::from_ref(&book)).unwrap()).unwrap();
        assert_eq!(decoded, vec![book]);
    }

    #[test]
    fn test_naive_timestamps_are_utc() {
        let data = br#"[{"isbn":"1","title":"T","author":"A",
            "added_at":"2024-05-06T07:08:09.123456",
            "borrower":"Bob","borrowed_at":"2024-05-07T00:00:00"}]"#;
        let books = decode(data).unwrap();
        assert_eq!(
            books[0].added_at,
            Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()
                + chrono::Duration::microseconds(123456)
        );
        assert_eq!(books[0].borrower(), Some("Bob"));
    }

    #[test]
    fn test_missing_borrower_keys_default_to_available() {
        let data = br#"[{"isbn":"1","title":"T","author":"A","added_at":"2024-05-06T07:08:09Z"}]"#;
        assert!(decode(data).unwrap()[0].is_available());
    }

    #[test]
    fn test_blank_content_is_empty() {
        assert!(decode(b"").unwrap().is_empty());
        assert!(decode(b"  \n").unwrap().is_empty());
    }

    #[test]
    fn test_inconsistent_borrower_fields_rejected() {
        let data = br#"[{"isbn":"1","title":"T","author":"A",
            "added_at":"2024-05-06T07:08:09Z","borrower":"Bob","borrowed_at":null}]"#;
        assert!(matches!(decode(data), Err(StorageError::Malformed(_))));
    }

    #[test]
    fn test_bad_timestamp_rejected() {
        let data = br#"[{"isbn":"1","title":"T","author":"A","added_at":"yesterday"}]"#;
        assert!(matches!(decode(data), Err(StorageError::Malformed(_))));
    }
}
