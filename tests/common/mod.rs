//! Shared helpers for the API integration tests

#![allow(dead_code)]

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use coursebook::server::{AppState, build_router};
use coursebook::storage::in_memory_stores;

/// Build a test server over fresh in-memory stores.
pub fn test_server() -> TestServer {
    let (users, courses) = in_memory_stores();
    let state = AppState::new(Arc::new(users), Arc::new(courses));
    TestServer::new(build_router(state))
}

/// Basic authorization header for the given credentials.
pub fn basic_auth(email: &str, password: &str) -> (HeaderName, HeaderValue) {
    let encoded = STANDARD.encode(format!("{email}:{password}"));
    (
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Basic {encoded}")).expect("valid header value"),
    )
}

/// Register a user through the API.
pub async fn register_user(server: &TestServer, first: &str, last: &str, email: &str, password: &str) {
    let response = server
        .post("/users")
        .json(&json!({
            "firstName": first,
            "lastName": last,
            "emailAddress": email,
            "password": password,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
}

/// Create a course as the given user and return the new id from the
/// Location header.
pub async fn create_course(
    server: &TestServer,
    email: &str,
    password: &str,
    title: &str,
    description: &str,
) -> Uuid {
    let (name, value) = basic_auth(email, password);
    let response = server
        .post("/courses")
        .add_header(name, value)
        .json(&json!({
            "title": title,
            "description": description,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let location = response.header(axum::http::header::LOCATION);
    let location = location.to_str().expect("location is ascii");
    location
        .strip_prefix("/courses/")
        .expect("location points at /courses/{id}")
        .parse()
        .expect("location carries a uuid")
}
