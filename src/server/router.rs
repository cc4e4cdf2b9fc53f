//! Route assembly for the API

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::server::{AppState, courses, users};

/// Build the full application router.
///
/// - GET  /courses — list courses with owners (public)
/// - GET  /courses/{id} — one course with owner (public)
/// - POST /courses — create a course (authenticated)
/// - PUT  /courses/{id} — update a course (owner only)
/// - DELETE /courses/{id} — delete a course (owner only)
/// - GET  /users — current user's profile (authenticated)
/// - POST /users — self-registration (public)
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(courses::router())
        .merge(users::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
