//! In-memory store implementations for testing and development
//!
//! Enforces the same constraints a relational backend would: field
//! validation before insert and email uniqueness under the write lock.
//! Iteration order is insertion order, which becomes the store's default
//! listing order.
//!
//! The user and course stores share one dataset so the course listing can
//! join each course with its owner; build both halves with
//! [`in_memory_stores`].

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::core::auth::hash_password;
use crate::core::error::StoreError;
use crate::core::service::{CourseStore, UserStore};
use crate::entities::{Course, CourseUpdate, CourseWithOwner, NewCourse, NewUser, User};

/// Shared dataset behind both in-memory stores.
#[derive(Default)]
struct InMemoryData {
    users: RwLock<IndexMap<Uuid, User>>,
    courses: RwLock<IndexMap<Uuid, Course>>,
}

/// In-memory user store.
#[derive(Clone)]
pub struct InMemoryUserStore {
    data: Arc<InMemoryData>,
}

/// In-memory course store.
#[derive(Clone)]
pub struct InMemoryCourseStore {
    data: Arc<InMemoryData>,
}

/// Create a connected pair of in-memory stores over one dataset.
pub fn in_memory_stores() -> (InMemoryUserStore, InMemoryCourseStore) {
    let data = Arc::new(InMemoryData::default());
    (
        InMemoryUserStore { data: data.clone() },
        InMemoryCourseStore { data },
    )
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        new_user.validate().map_err(StoreError::Validation)?;

        // Hash outside the lock; the uniqueness check runs under it.
        let password_hash = hash_password(&new_user.password)?;

        let mut users = self
            .data
            .users
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if users
            .values()
            .any(|u| u.email_address == new_user.email_address)
        {
            return Err(StoreError::Conflict(vec![
                "Email address must be unique".to_string(),
            ]));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email_address: new_user.email_address,
            password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<User>, StoreError> {
        let users = self
            .data
            .users
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self
            .data
            .users
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(users.values().find(|u| u.email_address == email).cloned())
    }
}

#[async_trait]
impl CourseStore for InMemoryCourseStore {
    async fn list(&self) -> Result<Vec<CourseWithOwner>, StoreError> {
        let courses = self
            .data
            .courses
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        let users = self
            .data
            .users
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        courses
            .values()
            .map(|course| {
                let owner = users.get(&course.user_id).ok_or_else(|| {
                    StoreError::Other(anyhow!(
                        "owner {} missing for course {}",
                        course.user_id,
                        course.id
                    ))
                })?;
                Ok(CourseWithOwner::from_parts(course, owner))
            })
            .collect()
    }

    async fn get_with_owner(&self, id: &Uuid) -> Result<Option<CourseWithOwner>, StoreError> {
        let courses = self
            .data
            .courses
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        let Some(course) = courses.get(id) else {
            return Ok(None);
        };

        let users = self
            .data
            .users
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        let owner = users.get(&course.user_id).ok_or_else(|| {
            StoreError::Other(anyhow!(
                "owner {} missing for course {}",
                course.user_id,
                course.id
            ))
        })?;

        Ok(Some(CourseWithOwner::from_parts(course, owner)))
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Course>, StoreError> {
        let courses = self
            .data
            .courses
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(courses.get(id).cloned())
    }

    async fn create(&self, owner_id: Uuid, new_course: NewCourse) -> Result<Course, StoreError> {
        new_course.validate().map_err(StoreError::Validation)?;

        let mut courses = self
            .data
            .courses
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let now = Utc::now();
        let course = Course {
            id: Uuid::new_v4(),
            title: new_course.title,
            description: new_course.description,
            estimated_time: new_course.estimated_time,
            materials_needed: new_course.materials_needed,
            user_id: owner_id,
            created_at: now,
            updated_at: now,
        };
        courses.insert(course.id, course.clone());

        Ok(course)
    }

    async fn update(&self, id: &Uuid, update: CourseUpdate) -> Result<Course, StoreError> {
        update.validate().map_err(StoreError::Validation)?;

        let mut courses = self
            .data
            .courses
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let course = courses
            .get_mut(id)
            .ok_or_else(|| StoreError::Other(anyhow!("course {} no longer exists", id)))?;
        update.apply(course);

        Ok(course.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), StoreError> {
        let mut courses = self
            .data
            .courses
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        courses.shift_remove(id);

        Ok(())
    }
}
