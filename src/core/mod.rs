//! Core module containing the store contracts, authentication, and errors

pub mod auth;
pub mod error;
pub mod service;

pub use auth::{Authenticator, BasicAuthenticator, BasicCredentials, CurrentUser};
pub use error::{ApiError, StoreError};
pub use service::{CourseStore, UserStore};
