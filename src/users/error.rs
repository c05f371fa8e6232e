// Registration and user-domain error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{debug, error, warn};

use crate::error::ErrorBody;

/// Error types for user registration operations
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("This email is already registered.")]
    AlreadyRegisteredEmail,

    #[error("This username is already registered.")]
    AlreadyRegisteredUsername,

    #[error("Username must be at least 3 characters long.")]
    UsernameTooShort,

    #[error("Username must be at most 50 characters long.")]
    UsernameTooLong,

    #[error("Username may only contain letters and digits.")]
    InvalidUsernameFormat,

    #[error("Password must be at least 5 characters long.")]
    PasswordTooShort,

    #[error("Password must contain at least one digit.")]
    PasswordMissingDigit,

    #[error("Password must contain at least one letter.")]
    PasswordMissingLetter,

    #[error("Invalid phone number format. Expected 010-1234-5678 or +821012345678.")]
    InvalidPhoneFormat,

    #[error("Request validation failed")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Password hashing failed")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl UserError {
    /// Stable machine-readable code used as the `type` field of the error body
    fn code(&self) -> &'static str {
        match self {
            UserError::AlreadyRegisteredEmail => "already_registered_email",
            UserError::AlreadyRegisteredUsername => "already_registered_username",
            UserError::UsernameTooShort => "username_too_short",
            UserError::UsernameTooLong => "username_too_long",
            UserError::InvalidUsernameFormat => "invalid_username_format",
            UserError::PasswordTooShort => "password_too_short",
            UserError::PasswordMissingDigit => "password_missing_digit",
            UserError::PasswordMissingLetter => "password_missing_letter",
            UserError::InvalidPhoneFormat => "invalid_phone_format",
            UserError::Validation(_) => "validation_error",
            UserError::PasswordHash(_) | UserError::Database(_) => "internal_error",
        }
    }

    /// Request location the error refers to
    fn loc(&self) -> &'static [&'static str] {
        match self {
            UserError::AlreadyRegisteredEmail => &["body", "email"],
            UserError::AlreadyRegisteredUsername
            | UserError::UsernameTooShort
            | UserError::UsernameTooLong
            | UserError::InvalidUsernameFormat => &["body", "username"],
            UserError::PasswordTooShort
            | UserError::PasswordMissingDigit
            | UserError::PasswordMissingLetter => &["body", "password"],
            UserError::InvalidPhoneFormat => &["body", "phone"],
            _ => &[],
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            UserError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            UserError::PasswordHash(_) | UserError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            UserError::Validation(errors) => {
                debug!("registration request validation failed: {:?}", errors);
                ErrorBody::from_validation(errors)
            }
            UserError::PasswordHash(e) => {
                error!("password hashing error: {}", e);
                ErrorBody::single("internal_error", &[], "An internal server error occurred.")
            }
            UserError::Database(e) => {
                error!("database error in user registration: {:?}", e);
                ErrorBody::single("internal_error", &[], "An internal server error occurred.")
            }
            UserError::AlreadyRegisteredEmail | UserError::AlreadyRegisteredUsername => {
                warn!("duplicate registration attempt: {}", self);
                ErrorBody::single(self.code(), self.loc(), self.to_string())
            }
            _ => {
                debug!("registration rejected: {}", self);
                ErrorBody::single(self.code(), self.loc(), self.to_string())
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_errors_are_bad_request() {
        assert_eq!(
            UserError::AlreadyRegisteredEmail.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            UserError::AlreadyRegisteredUsername.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_field_rule_errors_are_bad_request() {
        for err in [
            UserError::UsernameTooShort,
            UserError::UsernameTooLong,
            UserError::InvalidUsernameFormat,
            UserError::PasswordTooShort,
            UserError::PasswordMissingDigit,
            UserError::PasswordMissingLetter,
            UserError::InvalidPhoneFormat,
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_store_errors_are_internal() {
        let err = UserError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        // internal detail never leaks into the code
        assert_eq!(err.code(), "internal_error");
    }

    #[test]
    fn test_codes_name_the_offending_field() {
        assert_eq!(
            UserError::AlreadyRegisteredEmail.loc(),
            &["body", "email"]
        );
        assert_eq!(
            UserError::PasswordMissingDigit.loc(),
            &["body", "password"]
        );
    }
}
