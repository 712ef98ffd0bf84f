//! Borrow and return handlers

use super::BookResponse;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

/// Borrow request body
#[derive(Debug, Deserialize)]
pub struct BorrowRequest {
    pub borrower: String,
}

/// Check a book out
pub async fn borrow_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    Json(payload): Json<BorrowRequest>,
) -> ApiResult<Json<BookResponse>> {
    if payload.borrower.is_empty() {
        return Err(ApiError::Validation("Borrower must not be empty".to_string()));
    }

    let book = state
        .mutate(move |catalog| catalog.borrow_book(&isbn, &payload.borrower))
        .await?;
    Ok(Json(BookResponse::from(&book)))
}

/// Return a borrowed book
pub async fn return_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> ApiResult<Json<BookResponse>> {
    let book = state
        .mutate(move |catalog| catalog.return_book(&isbn))
        .await?;
    Ok(Json(BookResponse::from(&book)))
}
