//! Catalog browsing and registration handlers

use super::{serialize_books, BookResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use libapp_core::config::parse_bool;
use libapp_core::CatalogEntry;
use serde::Deserialize;

/// Query parameters for listing books
#[derive(Debug, Deserialize)]
pub struct ListBooksQuery {
    /// Only books nobody has borrowed (`true/false`, `1/0`, `yes/no`, `on/off`)
    pub available_only: Option<String>,
}

/// List all books, oldest first
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListBooksQuery>,
) -> ApiResult<Json<Vec<BookResponse>>> {
    let available_only = match query.available_only.as_deref() {
        None => false,
        Some(value) => parse_bool(value).ok_or_else(|| {
            ApiError::Validation(format!("available_only must be a boolean, got '{value}'"))
        })?,
    };
    let catalog = state.catalog.read().await;
    Ok(Json(serialize_books(&catalog.list_books(available_only))))
}

/// Register a new book
pub async fn create_book(
    State(state): State<AppState>,
    Json(payload): Json<CatalogEntry>,
) -> ApiResult<(StatusCode, Json<BookResponse>)> {
    payload.validate().map_err(ApiError::Validation)?;

    let book = state
        .mutate(move |catalog| {
            catalog.register_book(&payload.isbn, &payload.title, &payload.author)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(BookResponse::from(&book))))
}

/// Get a single book
pub async fn get_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> ApiResult<Json<BookResponse>> {
    let catalog = state.catalog.read().await;
    let book = catalog.get_book(&isbn)?;
    Ok(Json(BookResponse::from(&book)))
}

/// Delete a book
pub async fn delete_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .mutate(move |catalog| catalog.remove_book(&isbn))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Query parameters for searching
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub author: Option<String>,
}

/// Search by title or author; title wins when both are given
pub async fn search_books(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<BookResponse>> {
    let catalog = state.catalog.read().await;
    let books = match (query.title.as_deref(), query.author.as_deref()) {
        (Some(title), _) if !title.is_empty() => catalog.search_by_title(title),
        (_, Some(author)) if !author.is_empty() => catalog.search_by_author(author),
        _ => catalog.list_books(false),
    };
    Json(serialize_books(&books))
}
