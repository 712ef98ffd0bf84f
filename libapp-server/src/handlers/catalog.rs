//! Whole-catalog handlers: summary, import and reset

use super::{serialize_books, BookResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use libapp_core::{AuthorCount, CatalogEntry};
use serde::{Deserialize, Serialize};

/// Usage summary response
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub items: Vec<AuthorCount>,
}

/// Books per author
pub async fn summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let catalog = state.catalog.read().await;
    Json(SummaryResponse {
        items: catalog.usage_summary(),
    })
}

/// Import request body
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub books: Vec<CatalogEntry>,
}

/// Replace the whole catalog with the supplied books
///
/// Destructive: every existing book, borrowed or not, is discarded.
pub async fn import_catalog(
    State(state): State<AppState>,
    Json(payload): Json<ImportRequest>,
) -> ApiResult<Json<Vec<BookResponse>>> {
    for entry in &payload.books {
        entry.validate().map_err(ApiError::Validation)?;
    }

    let books = state
        .mutate(move |catalog| catalog.import_catalog(payload.books))
        .await?;
    Ok(Json(serialize_books(&books)))
}

/// Clear the catalog
pub async fn reset_catalog(State(state): State<AppState>) -> ApiResult<StatusCode> {
    state.mutate(|catalog| catalog.reset_catalog()).await?;
    Ok(StatusCode::NO_CONTENT)
}
