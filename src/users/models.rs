// User data models and DTOs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Role assigned to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Seller,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Seller => "seller",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(UserRole::Customer),
            "seller" => Ok(UserRole::Seller),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// User database model. The role column is TEXT; conversion to [`UserRole`]
/// happens where the typed value is needed.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub phone: Option<String>,
    pub points: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Registration request DTO.
/// Email format is checked by the validator derive (HTTP 422 on failure);
/// username/password/phone rules are domain checks in the service (HTTP 400).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "jane123")]
    pub username: String,
    #[validate(email)]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "password1")]
    pub password: String,
    pub role: UserRole,
    #[schema(example = "010-1234-5678")]
    pub phone: Option<String>,
}

/// Admin-creation request DTO: same shape as registration minus the role,
/// which is forced to admin.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAdminUserRequest {
    #[schema(example = "adminuser")]
    pub username: String,
    #[validate(email)]
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[schema(example = "password1")]
    pub password: String,
    #[schema(example = "010-1234-5678")]
    pub phone: Option<String>,
}

/// Registration response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateUserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "jane123")]
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for CreateUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::Customer, UserRole::Seller, UserRole::Admin] {
            assert_eq!(UserRole::from_str(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn test_role_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        let role: UserRole = serde_json::from_str("\"seller\"").unwrap();
        assert_eq!(role, UserRole::Seller);
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(UserRole::from_str("root").is_err());
        assert!(serde_json::from_str::<UserRole>("\"root\"").is_err());
    }

    #[test]
    fn test_create_user_request_deserialization() {
        let json = r#"{
            "username": "jane123",
            "email": "jane@example.com",
            "password": "password1",
            "role": "customer",
            "phone": "010-1234-5678"
        }"#;

        let request: CreateUserRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.username, "jane123");
        assert_eq!(request.role, UserRole::Customer);
        assert_eq!(request.phone.as_deref(), Some("010-1234-5678"));
    }

    #[test]
    fn test_create_user_request_phone_optional() {
        let json = r#"{
            "username": "jane123",
            "email": "jane@example.com",
            "password": "password1",
            "role": "seller"
        }"#;

        let request: CreateUserRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.phone, None);
    }

    #[test]
    fn test_response_excludes_sensitive_fields() {
        let response = CreateUserResponse {
            id: 7,
            username: "jane123".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
        assert!(json.get("email").is_none());
    }
}
