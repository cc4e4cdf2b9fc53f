//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresUserStore` and `PostgresCourseStore` backed by a
//! shared `sqlx::PgPool`. Field validation runs before every insert so
//! both backends raise identical messages; uniqueness is enforced by the
//! database and mapped back from SQLSTATE 23505.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! coursebook = { version = "0.1", features = ["postgres"] }
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::core::auth::hash_password;
use crate::core::error::StoreError;
use crate::core::service::{CourseStore, UserStore};
use crate::entities::{
    Course, CourseUpdate, CourseWithOwner, NewCourse, NewUser, User, UserProfile,
};

/// Connect a pool with a small default size.
pub async fn connect(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run the embedded migrations.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// User store backed by PostgreSQL.
#[derive(Clone, Debug)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Course store backed by PostgreSQL.
#[derive(Clone, Debug)]
pub struct PostgresCourseStore {
    pool: PgPool,
}

impl PostgresCourseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_database_error(error: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &error {
        tracing::debug!(code = ?db.code(), message = db.message(), "database operation failed");
        if db.is_unique_violation() {
            return StoreError::Conflict(vec!["Email address must be unique".to_string()]);
        }
    }
    StoreError::Other(error.into())
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        new_user.validate().map_err(StoreError::Validation)?;

        let password_hash = hash_password(&new_user.password)?;
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, first_name, last_name, email_address, password_hash, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) \
             RETURNING id, first_name, last_name, email_address, password_hash, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email_address)
        .bind(&password_hash)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_database_error)?;

        Ok(user)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, email_address, password_hash, created_at, updated_at \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_database_error)?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, email_address, password_hash, created_at, updated_at \
             FROM users WHERE email_address = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_database_error)?;

        Ok(user)
    }
}

/// Flat row shape for the course/owner join.
#[derive(sqlx::FromRow)]
struct CourseOwnerRow {
    id: Uuid,
    title: String,
    description: String,
    estimated_time: Option<String>,
    materials_needed: Option<String>,
    user_id: Uuid,
    first_name: String,
    last_name: String,
    email_address: String,
}

impl From<CourseOwnerRow> for CourseWithOwner {
    fn from(row: CourseOwnerRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            estimated_time: row.estimated_time,
            materials_needed: row.materials_needed,
            user_id: row.user_id,
            owner: UserProfile {
                first_name: row.first_name,
                last_name: row.last_name,
                email_address: row.email_address,
            },
        }
    }
}

const COURSE_OWNER_SELECT: &str =
    "SELECT c.id, c.title, c.description, c.estimated_time, c.materials_needed, c.user_id, \
            u.first_name, u.last_name, u.email_address \
     FROM courses c JOIN users u ON u.id = c.user_id";

#[async_trait]
impl CourseStore for PostgresCourseStore {
    async fn list(&self) -> Result<Vec<CourseWithOwner>, StoreError> {
        let rows = sqlx::query_as::<_, CourseOwnerRow>(&format!(
            "{COURSE_OWNER_SELECT} ORDER BY c.created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_database_error)?;

        Ok(rows.into_iter().map(CourseWithOwner::from).collect())
    }

    async fn get_with_owner(&self, id: &Uuid) -> Result<Option<CourseWithOwner>, StoreError> {
        let row = sqlx::query_as::<_, CourseOwnerRow>(&format!(
            "{COURSE_OWNER_SELECT} WHERE c.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_database_error)?;

        Ok(row.map(CourseWithOwner::from))
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Course>, StoreError> {
        let course = sqlx::query_as::<_, Course>(
            "SELECT id, title, description, estimated_time, materials_needed, user_id, created_at, updated_at \
             FROM courses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_database_error)?;

        Ok(course)
    }

    async fn create(&self, owner_id: Uuid, new_course: NewCourse) -> Result<Course, StoreError> {
        new_course.validate().map_err(StoreError::Validation)?;

        let now = Utc::now();
        let course = sqlx::query_as::<_, Course>(
            "INSERT INTO courses (id, title, description, estimated_time, materials_needed, user_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7) \
             RETURNING id, title, description, estimated_time, materials_needed, user_id, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&new_course.title)
        .bind(&new_course.description)
        .bind(&new_course.estimated_time)
        .bind(&new_course.materials_needed)
        .bind(owner_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_database_error)?;

        Ok(course)
    }

    async fn update(&self, id: &Uuid, update: CourseUpdate) -> Result<Course, StoreError> {
        update.validate().map_err(StoreError::Validation)?;

        let course = sqlx::query_as::<_, Course>(
            "UPDATE courses SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 estimated_time = COALESCE($4, estimated_time), \
                 materials_needed = COALESCE($5, materials_needed), \
                 updated_at = $6 \
             WHERE id = $1 \
             RETURNING id, title, description, estimated_time, materials_needed, user_id, created_at, updated_at",
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(&update.estimated_time)
        .bind(&update.materials_needed)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_database_error)?;

        Ok(course)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_database_error)?;

        Ok(())
    }
}
