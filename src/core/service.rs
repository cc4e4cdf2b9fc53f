//! Store traits for user and course persistence
//!
//! The handlers are agnostic to the underlying storage mechanism; they
//! receive these traits as injected `Arc<dyn ...>` collaborators.

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::StoreError;
use crate::entities::{Course, CourseUpdate, CourseWithOwner, NewCourse, NewUser, User};

/// Persistence contract for user accounts.
///
/// `create` runs field validation, enforces email uniqueness, and hashes
/// the plaintext password before the record is kept.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a new user from a registration payload.
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Get a user by ID.
    async fn get(&self, id: &Uuid) -> Result<Option<User>, StoreError>;

    /// Look a user up by email address (credential resolution).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// Persistence contract for courses.
///
/// Listing and single-record reads return the owner-joined projection;
/// the raw record is exposed separately for the ownership gate on
/// mutating routes.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// List all courses with their owners, in store order.
    async fn list(&self) -> Result<Vec<CourseWithOwner>, StoreError>;

    /// Get one course with its owner.
    async fn get_with_owner(&self, id: &Uuid) -> Result<Option<CourseWithOwner>, StoreError>;

    /// Get the raw course record.
    async fn get(&self, id: &Uuid) -> Result<Option<Course>, StoreError>;

    /// Create a course owned by `owner_id`.
    async fn create(&self, owner_id: Uuid, new_course: NewCourse) -> Result<Course, StoreError>;

    /// Apply a partial update to an existing course.
    async fn update(&self, id: &Uuid, update: CourseUpdate) -> Result<Course, StoreError>;

    /// Remove a course.
    async fn delete(&self, id: &Uuid) -> Result<(), StoreError>;
}
