//! Server module: shared state, route assembly, and the listener
//!
//! Handlers are stateless; everything they need is injected through
//! [`AppState`]. The stores and the authenticator are trait objects so
//! the same routes run against any backend.

pub mod courses;
pub mod router;
pub mod users;

pub use router::build_router;

use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::core::auth::{Authenticator, BasicAuthenticator};
use crate::core::service::{CourseStore, UserStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub courses: Arc<dyn CourseStore>,
    pub auth: Arc<dyn Authenticator>,
}

impl AppState {
    /// Build state over a store pair; authentication resolves credentials
    /// through the same user store.
    pub fn new(users: Arc<dyn UserStore>, courses: Arc<dyn CourseStore>) -> Self {
        let auth: Arc<dyn Authenticator> = Arc::new(BasicAuthenticator::new(users.clone()));
        Self {
            users,
            courses,
            auth,
        }
    }
}

/// Bind the configured address and serve until shutdown.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let app = build_router(state);
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "coursebook listening");
    axum::serve(listener, app).await?;
    Ok(())
}
