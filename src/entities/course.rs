//! Course entity, payloads, and the owner-joined projection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::user::{User, UserProfile};

/// A course record as kept by the store.
///
/// `user_id` references the owning user and is always set from the
/// authenticated requester at creation time; it never comes from the
/// request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for `POST /courses`.
///
/// A client-supplied `userId` is deliberately not part of this payload:
/// ownership is taken from the authenticated identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

impl NewCourse {
    /// Field-level validation matching the store's constraints.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("Title is required".to_string());
        }
        if self.description.trim().is_empty() {
            errors.push("Description is required".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Partial update payload for `PUT /courses/{id}`.
///
/// Absent (or null) fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

impl CourseUpdate {
    /// Reject updates that would blank out a required field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            errors.push("Title is required".to_string());
        }
        if self
            .description
            .as_deref()
            .is_some_and(|d| d.trim().is_empty())
        {
            errors.push("Description is required".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Apply the supplied fields to an existing record.
    pub fn apply(&self, course: &mut Course) {
        if let Some(title) = &self.title {
            course.title = title.clone();
        }
        if let Some(description) = &self.description {
            course.description = description.clone();
        }
        if let Some(estimated_time) = &self.estimated_time {
            course.estimated_time = Some(estimated_time.clone());
        }
        if let Some(materials_needed) = &self.materials_needed {
            course.materials_needed = Some(materials_needed.clone());
        }
        course.updated_at = Utc::now();
    }
}

/// Wire projection of a course joined with its owner.
///
/// Timestamps are excluded; the owner appears as a nested object with
/// first/last name and email only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseWithOwner {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: Uuid,
    pub owner: UserProfile,
}

impl CourseWithOwner {
    pub fn from_parts(course: &Course, owner: &User) -> Self {
        Self {
            id: course.id,
            title: course.title.clone(),
            description: course.description.clone(),
            estimated_time: course.estimated_time.clone(),
            materials_needed: course.materials_needed.clone(),
            user_id: course.user_id,
            owner: UserProfile::from(owner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(owner: Uuid) -> Course {
        let now = Utc::now();
        Course {
            id: Uuid::new_v4(),
            title: "Build a Basic Bookcase".to_string(),
            description: "High-end furniture projects are great.".to_string(),
            estimated_time: Some("12 hours".to_string()),
            materials_needed: None,
            user_id: owner,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_new_course_validate_requires_title_and_description() {
        let new_course = NewCourse {
            title: String::new(),
            description: String::new(),
            estimated_time: None,
            materials_needed: None,
        };
        let errors = new_course.validate().unwrap_err();
        assert_eq!(errors, vec!["Title is required", "Description is required"]);
    }

    #[test]
    fn test_new_course_validate_accepts_minimal_payload() {
        let new_course = NewCourse {
            title: "Learn How to Program".to_string(),
            description: "Courses on programming languages.".to_string(),
            estimated_time: None,
            materials_needed: None,
        };
        assert!(new_course.validate().is_ok());
    }

    #[test]
    fn test_update_validate_rejects_blank_title() {
        let update = CourseUpdate {
            title: Some("  ".to_string()),
            ..CourseUpdate::default()
        };
        let errors = update.validate().unwrap_err();
        assert_eq!(errors, vec!["Title is required"]);
    }

    #[test]
    fn test_update_validate_allows_absent_fields() {
        assert!(CourseUpdate::default().validate().is_ok());
    }

    #[test]
    fn test_update_apply_changes_only_supplied_fields() {
        let mut record = course(Uuid::new_v4());
        let before = record.clone();
        let update = CourseUpdate {
            title: Some("Build a Better Bookcase".to_string()),
            ..CourseUpdate::default()
        };

        update.apply(&mut record);

        assert_eq!(record.title, "Build a Better Bookcase");
        assert_eq!(record.description, before.description);
        assert_eq!(record.estimated_time, before.estimated_time);
        assert_eq!(record.user_id, before.user_id);
    }

    #[test]
    fn test_update_apply_touches_updated_at() {
        let mut record = course(Uuid::new_v4());
        let before = record.updated_at;
        let update = CourseUpdate {
            description: Some("Revised description".to_string()),
            ..CourseUpdate::default()
        };

        update.apply(&mut record);

        assert!(record.updated_at >= before);
    }

    #[test]
    fn test_projection_excludes_timestamps_and_includes_owner() {
        let owner = User {
            id: Uuid::new_v4(),
            first_name: "Joe".to_string(),
            last_name: "Smith".to_string(),
            email_address: "joe@smith.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let record = course(owner.id);

        let json = serde_json::to_value(CourseWithOwner::from_parts(&record, &owner)).unwrap();

        assert!(json.get("createdAt").is_none());
        assert!(json.get("updatedAt").is_none());
        assert_eq!(json["owner"]["firstName"], "Joe");
        assert_eq!(json["owner"]["emailAddress"], "joe@smith.com");
        assert!(json["owner"].get("id").is_none());
        assert_eq!(json["userId"], serde_json::json!(owner.id));
    }
}
