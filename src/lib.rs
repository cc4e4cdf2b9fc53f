//! # Coursebook
//!
//! A REST/JSON API for a school course catalogue.
//!
//! ## Features
//!
//! - **Two resources**: courses (public reads, owner-gated mutations) and
//!   users (self-registration, authenticated profile lookup)
//! - **Pluggable storage**: in-memory stores by default, PostgreSQL via
//!   the `postgres` feature
//! - **Basic authentication**: `Authorization: Basic` credentials verified
//!   against Argon2 password hashes
//! - **Uniform validation errors**: store-level validation and uniqueness
//!   failures normalize to `400 { "errors": [...] }`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coursebook::prelude::*;
//!
//! let (users, courses) = in_memory_stores();
//! let state = AppState::new(Arc::new(users), Arc::new(courses));
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{Authenticator, BasicAuthenticator, BasicCredentials, CurrentUser},
        error::{ApiError, StoreError},
        service::{CourseStore, UserStore},
    };

    // === Entities ===
    pub use crate::entities::{
        Course, CourseUpdate, CourseWithOwner, NewCourse, NewUser, User, UserProfile,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryCourseStore, InMemoryUserStore, in_memory_stores};
    #[cfg(feature = "postgres")]
    pub use crate::storage::{PostgresCourseStore, PostgresUserStore};

    // === Config ===
    pub use crate::config::ServerConfig;

    // === Server ===
    pub use crate::server::{AppState, build_router, serve};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
