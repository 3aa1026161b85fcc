use axum::{Router, http::Uri, routing::get};

use crate::{error::AppError, state::AppState};

pub mod doc;
pub mod health;
pub mod params;
pub mod products;
pub mod wishlist_items;
pub mod wishlists;

// Build the API router without binding state; it is provided by `create_router`.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(products::router())
        .merge(wishlists::router())
        .merge(wishlist_items::router())
}

/// The complete application, shared by the binary and the integration tests.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
