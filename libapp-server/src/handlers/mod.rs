//! Request handlers

mod books;
mod catalog;
mod circulation;

pub use books::*;
pub use catalog::*;
pub use circulation::*;

use axum::Json;
use chrono::{DateTime, Utc};
use libapp_core::Book;
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Root response
#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// API banner
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Simple Library API",
    })
}

/// Book as returned by every endpoint
#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub added_at: DateTime<Utc>,
    pub available: bool,
    pub borrower: Option<String>,
    pub borrowed_at: Option<DateTime<Utc>>,
}

impl From<&Book> for BookResponse {
    fn from(book: &Book) -> Self {
        Self {
            isbn: book.isbn.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            added_at: book.added_at,
            available: book.is_available(),
            borrower: book.borrower().map(str::to_string),
            borrowed_at: book.borrowed_at(),
        }
    }
}

fn serialize_books(books: &[Book]) -> Vec<BookResponse> {
    books.iter().map(BookResponse::from).collect()
}
