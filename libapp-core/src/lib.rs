//! Libapp Core Library
//!
//! This crate provides the catalog model and the repository/service layers for the
//! libapp library manager. Books are keyed by normalized ISBN, held in memory and
//! persisted as a single JSON document through a pluggable [`storage::CatalogStore`].

pub mod config;
pub mod defaults;
pub mod error;
pub mod isbn;
pub mod repository;
pub mod service;
pub mod storage;
pub mod table;
pub mod types;

pub use config::{AppConfig, ConfigOverrides};
pub use error::{LibraryError, Result, StorageError};
pub use isbn::normalize_isbn;
pub use repository::CatalogRepository;
pub use service::CatalogService;
pub use types::{AuthorCount, Book, CatalogEntry};
