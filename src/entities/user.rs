//! User entity and its request/response payloads

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

/// A registered user account.
///
/// The password credential is stored as an Argon2 PHC hash and is never
/// serialized. Timestamps are maintained by the store and excluded from
/// every wire projection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Self-registration payload for `POST /users`.
///
/// Fields default to empty so that missing keys surface as validation
/// messages rather than deserialization failures.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email_address: String,
    /// Plaintext password, hashed by the store before the record is kept.
    #[serde(default)]
    pub password: String,
}

impl NewUser {
    /// Field-level validation, mirroring the constraints the relational
    /// backend enforces. Messages are ordered by field declaration.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.first_name.trim().is_empty() {
            errors.push("First name is required".to_string());
        }
        if self.last_name.trim().is_empty() {
            errors.push("Last name is required".to_string());
        }
        if self.email_address.trim().is_empty() {
            errors.push("Email address is required".to_string());
        } else if !is_valid_email(&self.email_address) {
            errors.push("Email address must be a valid email".to_string());
        }
        if self.password.is_empty() {
            errors.push("Password is required".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Public projection of a user: first/last name and email only.
///
/// Used both as the `GET /users` body and as the `owner` object embedded
/// in course responses. Id and password hash are intentionally omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email_address: user.email_address.clone(),
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
    });
    regex.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_new_user() -> NewUser {
        NewUser {
            first_name: "Joe".to_string(),
            last_name: "Smith".to_string(),
            email_address: "joe@smith.com".to_string(),
            password: "joepassword".to_string(),
        }
    }

    #[test]
    fn test_validate_complete_payload_returns_ok() {
        assert!(valid_new_user().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_payload_reports_every_field_in_order() {
        let new_user = NewUser {
            first_name: String::new(),
            last_name: String::new(),
            email_address: String::new(),
            password: String::new(),
        };
        let errors = new_user.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                "First name is required",
                "Last name is required",
                "Email address is required",
                "Password is required",
            ]
        );
    }

    #[test]
    fn test_validate_malformed_email_reports_format_message() {
        let mut new_user = valid_new_user();
        new_user.email_address = "not-an-email".to_string();
        let errors = new_user.validate().unwrap_err();
        assert_eq!(errors, vec!["Email address must be a valid email"]);
    }

    #[test]
    fn test_validate_whitespace_name_counts_as_missing() {
        let mut new_user = valid_new_user();
        new_user.first_name = "   ".to_string();
        let errors = new_user.validate().unwrap_err();
        assert_eq!(errors, vec!["First name is required"]);
    }

    #[test]
    fn test_user_serialization_omits_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            first_name: "Joe".to_string(),
            last_name: "Smith".to_string(),
            email_address: "joe@smith.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["emailAddress"], "joe@smith.com");
    }

    #[test]
    fn test_profile_uses_camel_case_keys() {
        let profile = UserProfile {
            first_name: "Joe".to_string(),
            last_name: "Smith".to_string(),
            email_address: "joe@smith.com".to_string(),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["firstName"], "Joe");
        assert_eq!(json["lastName"], "Smith");
        assert_eq!(json["emailAddress"], "joe@smith.com");
    }

    #[test]
    fn test_new_user_missing_keys_default_to_empty() {
        let new_user: NewUser = serde_json::from_value(serde_json::json!({
            "firstName": "Joe"
        }))
        .unwrap();
        assert_eq!(new_user.first_name, "Joe");
        assert!(new_user.last_name.is_empty());
        assert!(new_user.password.is_empty());
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@nodot"));
    }
}
