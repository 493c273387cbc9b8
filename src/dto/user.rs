//! DTO definitions for account registration, login and maintenance.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dao::models::{Role, UserEntity};

/// Payload for creating a regular account.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "the name field is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "the surname field is required"))]
    pub surname: String,
    #[validate(length(min = 1, message = "the username field is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "the email field is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "the password field is required"))]
    pub password: String,
}

/// Credentials exchanged for a session token.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "the username field is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "the password field is required"))]
    pub password: String,
}

/// Partial account update. Absent fields stay untouched; `password` and
/// `role` are listed so their presence can be rejected explicitly on the
/// self-service route.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

/// Payload for creating an account through the admin surface.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AdminCreateUserRequest {
    #[validate(length(min = 1, message = "the name field is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "the surname field is required"))]
    pub surname: String,
    #[validate(length(min = 1, message = "the username field is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "the email field is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "the password field is required"))]
    pub password: String,
    /// Role for the new account; defaults to `USER`.
    pub role: Option<Role>,
}

/// Lookup of one account by its login name.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SearchUserRequest {
    #[validate(length(min = 1, message = "the username field is required"))]
    pub username: String,
}

/// Projection of an account with the password hash stripped.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<UserEntity> for UserSummary {
    fn from(value: UserEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            surname: value.surname,
            username: value.username,
            email: value.email,
            role: value.role,
        }
    }
}

/// Envelope carrying one account, with a message on mutations.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: UserSummary,
}

/// Every known account, for the admin listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<UserSummary>,
}

/// Session token issued after a successful login.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[test]
    fn registration_requires_every_field() {
        let request = RegisterRequest {
            name: String::new(),
            surname: "Lovelace".into(),
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: "secret".into(),
        };

        let err = request.validate().unwrap_err();
        assert!(err.field_errors().contains_key("name"));
    }

    #[test]
    fn complete_registration_passes_validation() {
        let request = RegisterRequest {
            name: "Ada".into(),
            surname: "Lovelace".into(),
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: "secret".into(),
        };

        assert!(request.validate().is_ok());
    }

    #[test]
    fn summary_drops_the_password_hash() {
        let entity = UserEntity {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            surname: "Lovelace".into(),
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: "$2b$12$hash".into(),
            role: Role::User,
        };

        let summary = UserSummary::from(entity);
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "ada");
        assert_eq!(json["role"], "USER");
    }
}
