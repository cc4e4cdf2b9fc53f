//! HTTP handlers for the user resource

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::core::auth::CurrentUser;
use crate::core::error::ApiError;
use crate::entities::{NewUser, UserProfile};
use crate::server::AppState;

/// User routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/users", get(get_current_user).post(create_user))
}

/// Return the authenticated user's profile
///
/// GET /users
///
/// Id and password credential are intentionally omitted from the body.
pub async fn get_current_user(current_user: CurrentUser) -> Json<UserProfile> {
    Json(current_user.profile())
}

/// Register a new user
///
/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(new_user): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    state.users.create(new_user).await?;
    Ok((StatusCode::CREATED, [(LOCATION, "/".to_string())]))
}
