use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};

use crate::http::handlers;
use crate::service::accommodations::AccommodationService;
use crate::service::search::SearchEngine;

#[derive(Clone)]
pub struct AppState {
    pub accommodations: Arc<AccommodationService>,
    pub search: Arc<SearchEngine>,
}

/// Builds the service's HTTP router.
///
/// # Registered Endpoints
/// - `GET /health`
/// - `GET /api/accommodations/search` - filtered search
/// - `GET|POST /api/accommodations` - list all, create
/// - `GET|PUT|DELETE /api/accommodations/{id}`
/// - `POST /api/accommodations/by-ids`
/// - `PUT /api/accommodations/{id}/rating`
/// - `DELETE /api/accommodations/owner/{owner_id}`
/// - `GET /api/accommodations/images/{image_id}`
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/accommodations/search", get(handlers::search))
        .route(
            "/api/accommodations",
            get(handlers::list).post(handlers::create),
        )
        .route("/api/accommodations/by-ids", post(handlers::find_by_ids))
        .route(
            "/api/accommodations/owner/{owner_id}",
            delete(handlers::delete_by_owner),
        )
        .route(
            "/api/accommodations/images/{image_id}",
            get(handlers::get_image),
        )
        .route(
            "/api/accommodations/{id}",
            get(handlers::get_by_id)
                .put(handlers::update)
                .delete(handlers::delete),
        )
        .route(
            "/api/accommodations/{id}/rating",
            put(handlers::update_rating),
        )
        .with_state(state)
}
