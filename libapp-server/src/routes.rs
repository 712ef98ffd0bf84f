//! API routes

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

const DEV_ORIGINS: [&str; 4] = [
    "http://localhost:8000",
    "http://localhost:5173",
    "http://127.0.0.1:8000",
    "http://127.0.0.1:5173",
];

/// Build the CORS layer from `LIBAPP_CORS_ORIGINS`
///
/// The variable is a comma-separated list of origins, or `*` for any. When
/// unset, local development origins are allowed.
fn cors_layer(origins: Option<String>) -> CorsLayer {
    let allow_origin = match origins {
        Some(origins) if origins.trim() == "*" => AllowOrigin::any(),
        Some(origins) => AllowOrigin::list(
            origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect::<Vec<_>>(),
        ),
        None => AllowOrigin::list(DEV_ORIGINS.iter().filter_map(|o| o.parse().ok())),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let book_routes = Router::new()
        .route("/books", get(handlers::list_books).post(handlers::create_book))
        .route("/books/search", get(handlers::search_books))
        .route(
            "/books/:isbn",
            get(handlers::get_book).delete(handlers::delete_book),
        )
        .route("/books/:isbn/borrow", post(handlers::borrow_book))
        .route("/books/:isbn/return", post(handlers::return_book));

    let catalog_routes = Router::new()
        .route("/summary", get(handlers::summary))
        .route("/import", post(handlers::import_catalog))
        .route(
            "/catalog",
            axum::routing::delete(handlers::reset_catalog),
        );

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .merge(book_routes)
        .merge(catalog_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(std::env::var("LIBAPP_CORS_ORIGINS").ok())),
        )
        .with_state(state)
}
