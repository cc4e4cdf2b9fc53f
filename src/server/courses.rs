//! HTTP handlers for the course resource
//!
//! Reads are public; every mutation requires authentication and, for
//! update/delete, ownership of the record. The 404/403 precedence is
//! fixed: a missing course is reported before the ownership check runs.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use uuid::Uuid;

use crate::core::auth::CurrentUser;
use crate::core::error::ApiError;
use crate::entities::{CourseUpdate, CourseWithOwner, NewCourse};
use crate::server::AppState;

/// Course routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/", get(list_courses))
        .route(
            "/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
}

/// List all courses with their owners
///
/// GET /courses
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseWithOwner>>, ApiError> {
    let courses = state.courses.list().await?;
    Ok(Json(courses))
}

/// Fetch one course with its owner
///
/// GET /courses/{id}
///
/// A miss responds 400 rather than 404; observed behavior, kept intact.
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseWithOwner>, ApiError> {
    match state.courses.get_with_owner(&id).await? {
        Some(course) => Ok(Json(course)),
        None => Err(ApiError::BadRequest("Course not found!".to_string())),
    }
}

/// Create a course owned by the authenticated user
///
/// POST /courses
///
/// Ownership comes from the verified identity; a `userId` in the body is
/// ignored.
pub async fn create_course(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(new_course): Json<NewCourse>,
) -> Result<impl IntoResponse, ApiError> {
    let course = state.courses.create(current_user.id, new_course).await?;
    Ok((
        StatusCode::CREATED,
        [(LOCATION, format!("/courses/{}", course.id))],
    ))
}

/// Update a course (owner only)
///
/// PUT /courses/{id}
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    current_user: CurrentUser,
    Json(update): Json<CourseUpdate>,
) -> Result<StatusCode, ApiError> {
    let Some(course) = state.courses.get(&id).await? else {
        return Err(ApiError::NotFound("Course not found!".to_string()));
    };
    if course.user_id != current_user.id {
        return Err(ApiError::Forbidden(
            "You don't have access to update this course".to_string(),
        ));
    }

    state.courses.update(&id, update).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a course (owner only)
///
/// DELETE /courses/{id}
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    current_user: CurrentUser,
) -> Result<StatusCode, ApiError> {
    let Some(course) = state.courses.get(&id).await? else {
        return Err(ApiError::NotFound("Course not found!".to_string()));
    };
    if course.user_id != current_user.id {
        return Err(ApiError::Forbidden(
            "You don't have access to delete this course".to_string(),
        ));
    }

    state.courses.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
