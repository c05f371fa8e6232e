// Authentication error types

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, warn};

use crate::auth::token::TokenKind;
use crate::error::ErrorBody;

/// Authentication and token-lifecycle error types.
///
/// Each variant carries a distinct internal cause code, but the user-facing
/// message never reveals which credential or refresh check failed.
#[derive(Debug)]
pub enum AuthError {
    /// No credential in the request (neither channel)
    MissingAuthHeader,
    /// Authorization header present but not `Bearer <token>`
    InvalidBearerFormat,
    /// Signature valid but the token is past its expiry
    TokenExpired(TokenKind),
    /// Signature/algorithm mismatch or malformed token
    InvalidToken(TokenKind),
    /// Well-formed token without a subject claim
    MissingSubject,
    /// Subject does not resolve to an active user; deliberately does not
    /// distinguish "not found" from "disabled"
    InactiveOrInvalidUser,
    /// Bad username or bad password; deliberately undifferentiated
    InvalidCredentials,
    /// Refresh token absent from the revocation store: already rotated,
    /// or never issued
    RefreshTokenConsumed,
    /// Stored role value does not parse
    InvalidRole(String),
    TokenCreation(jsonwebtoken::errors::Error),
    PasswordHash(bcrypt::BcryptError),
    Database(sqlx::Error),
    Revocation(redis::RedisError),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "Authorization header is required."),
            AuthError::InvalidBearerFormat => {
                write!(f, "Invalid Authorization header format. Use 'Bearer <token>'.")
            }
            AuthError::TokenExpired(TokenKind::Access) => write!(f, "Token has expired."),
            AuthError::TokenExpired(TokenKind::Refresh) => {
                write!(f, "Refresh token has expired.")
            }
            AuthError::InvalidToken(TokenKind::Access) => write!(f, "Invalid token."),
            AuthError::InvalidToken(TokenKind::Refresh) => write!(f, "Invalid refresh token."),
            AuthError::MissingSubject => write!(f, "Invalid token: no subject claim."),
            AuthError::InactiveOrInvalidUser => write!(f, "Inactive or invalid user."),
            AuthError::InvalidCredentials => write!(f, "Invalid username or password."),
            AuthError::RefreshTokenConsumed => {
                write!(f, "Refresh token already used or invalid.")
            }
            AuthError::InvalidRole(role) => write!(f, "Invalid role value: {}", role),
            AuthError::TokenCreation(e) => write!(f, "Token generation error: {}", e),
            AuthError::PasswordHash(e) => write!(f, "Password verification error: {}", e),
            AuthError::Database(e) => write!(f, "Database error: {}", e),
            AuthError::Revocation(e) => write!(f, "Revocation store error: {}", e),
        }
    }
}

impl std::error::Error for AuthError {}

impl AuthError {
    /// Stable machine-readable code used as the `type` field of the error body
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "authorization_header_missing",
            AuthError::InvalidBearerFormat => "invalid_bearer_format",
            AuthError::TokenExpired(TokenKind::Access) => "token_expired",
            AuthError::TokenExpired(TokenKind::Refresh) => "refresh_token_expired",
            AuthError::InvalidToken(TokenKind::Access) => "invalid_token",
            AuthError::InvalidToken(TokenKind::Refresh) => "invalid_refresh_token",
            AuthError::MissingSubject => "invalid_token_no_subject",
            AuthError::InactiveOrInvalidUser => "inactive_or_invalid_user",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::RefreshTokenConsumed => "refresh_token_already_used",
            AuthError::InvalidRole(_)
            | AuthError::TokenCreation(_)
            | AuthError::PasswordHash(_)
            | AuthError::Database(_)
            | AuthError::Revocation(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidRole(_)
            | AuthError::TokenCreation(_)
            | AuthError::PasswordHash(_)
            | AuthError::Database(_)
            | AuthError::Revocation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn loc(&self) -> &'static [&'static str] {
        match self {
            AuthError::MissingAuthHeader | AuthError::InvalidBearerFormat => {
                &["headers", "authorization"]
            }
            AuthError::TokenExpired(TokenKind::Refresh)
            | AuthError::InvalidToken(TokenKind::Refresh)
            | AuthError::RefreshTokenConsumed => &["body", "refresh_token"],
            AuthError::InvalidCredentials => &["body"],
            _ => &[],
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            AuthError::InvalidRole(role) => {
                error!("user record carries an unparseable role: {}", role);
                ErrorBody::single("internal_error", &[], "An internal server error occurred.")
            }
            AuthError::TokenCreation(e) => {
                error!("token generation error: {}", e);
                ErrorBody::single("internal_error", &[], "An internal server error occurred.")
            }
            AuthError::PasswordHash(e) => {
                error!("password verification error: {}", e);
                ErrorBody::single("internal_error", &[], "An internal server error occurred.")
            }
            AuthError::Database(e) => {
                error!("database error in auth: {:?}", e);
                ErrorBody::single("internal_error", &[], "An internal server error occurred.")
            }
            AuthError::Revocation(e) => {
                error!("revocation store error: {}", e);
                ErrorBody::single("internal_error", &[], "An internal server error occurred.")
            }
            AuthError::InvalidCredentials => {
                warn!("login rejected: invalid credentials");
                ErrorBody::single(self.code(), self.loc(), self.to_string())
            }
            _ => {
                warn!("authentication rejected: {}", self.code());
                ErrorBody::single(self.code(), self.loc(), self.to_string())
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(e: sqlx::Error) -> Self {
        AuthError::Database(e)
    }
}

impl From<redis::RedisError> for AuthError {
    fn from(e: redis::RedisError) -> Self {
        AuthError::Revocation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_errors_are_unauthorized() {
        for err in [
            AuthError::MissingAuthHeader,
            AuthError::InvalidBearerFormat,
            AuthError::TokenExpired(TokenKind::Access),
            AuthError::TokenExpired(TokenKind::Refresh),
            AuthError::InvalidToken(TokenKind::Access),
            AuthError::InvalidToken(TokenKind::Refresh),
            AuthError::MissingSubject,
            AuthError::InactiveOrInvalidUser,
            AuthError::InvalidCredentials,
            AuthError::RefreshTokenConsumed,
        ] {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_store_failures_are_internal() {
        let err = AuthError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "internal_error");
    }

    #[test]
    fn test_codes_distinguish_token_kinds() {
        assert_eq!(AuthError::TokenExpired(TokenKind::Access).code(), "token_expired");
        assert_eq!(
            AuthError::TokenExpired(TokenKind::Refresh).code(),
            "refresh_token_expired"
        );
        assert_eq!(AuthError::InvalidToken(TokenKind::Access).code(), "invalid_token");
        assert_eq!(
            AuthError::InvalidToken(TokenKind::Refresh).code(),
            "invalid_refresh_token"
        );
    }

    #[test]
    fn test_credential_message_does_not_leak_cause() {
        // one message regardless of whether username or password failed
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid username or password."
        );
        // one message for missing vs disabled user
        assert_eq!(
            AuthError::InactiveOrInvalidUser.to_string(),
            "Inactive or invalid user."
        );
    }
}
