//! Core catalog types

mod book;
mod entry;

pub use book::Book;
pub use entry::{AuthorCount, CatalogEntry};
