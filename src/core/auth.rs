//! Basic authentication for protected routes
//!
//! Credentials arrive as `Authorization: Basic <base64(email:password)>`.
//! The [`Authenticator`] collaborator resolves them to a verified
//! [`CurrentUser`]; handlers opt in by taking `CurrentUser` as an
//! extractor argument. Every failure mode (missing header, malformed
//! value, unknown user, wrong password) produces the same 401 response —
//! the reason is only visible in the logs.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{ApiError, StoreError};
use crate::core::service::UserStore;
use crate::entities::{User, UserProfile};
use crate::server::AppState;

/// The verified identity attached to an authenticated request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

impl CurrentUser {
    /// Public projection of this identity.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email_address: self.email_address.clone(),
        }
    }
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email_address: user.email_address.clone(),
        }
    }
}

/// Email/password pair decoded from a Basic authorization header.
#[derive(Debug, Clone)]
pub struct BasicCredentials {
    pub email: String,
    pub password: String,
}

impl BasicCredentials {
    /// Parse an `Authorization` header value.
    ///
    /// Returns `None` for anything that is not a well-formed
    /// `Basic <base64(email:password)>` value.
    pub fn parse(header: &str) -> Option<Self> {
        let encoded = header.strip_prefix("Basic ")?;
        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (email, password) = decoded.split_once(':')?;
        Some(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

/// Trait for authentication collaborators.
///
/// `Ok(None)` means the credentials did not resolve to a user; store
/// failures propagate separately.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(
        &self,
        credentials: &BasicCredentials,
    ) -> Result<Option<CurrentUser>, StoreError>;
}

/// Authenticator backed by the user store and Argon2 verification.
pub struct BasicAuthenticator {
    users: Arc<dyn UserStore>,
}

impl BasicAuthenticator {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Authenticator for BasicAuthenticator {
    async fn authenticate(
        &self,
        credentials: &BasicCredentials,
    ) -> Result<Option<CurrentUser>, StoreError> {
        let Some(user) = self.users.find_by_email(&credentials.email).await? else {
            return Ok(None);
        };
        if verify_password(&credentials.password, &user.password_hash) {
            Ok(Some(CurrentUser::from(&user)))
        } else {
            Ok(None)
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let Some(credentials) = header.and_then(BasicCredentials::parse) else {
            tracing::warn!("missing or malformed authorization header");
            return Err(ApiError::Unauthorized);
        };

        match state.auth.authenticate(&credentials).await {
            Ok(Some(current_user)) => Ok(current_user),
            Ok(None) => {
                tracing::warn!(email = %credentials.email, "authentication failed");
                Err(ApiError::Unauthorized)
            }
            Err(err) => Err(ApiError::from(err)),
        }
    }
}

/// Hash a plaintext password into an Argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, anyhow::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored hash.
///
/// An unparseable hash counts as a failed verification, not an error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
