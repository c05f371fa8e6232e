// Error handling module for the Shop API
// Provides the shared error-response shape and the top-level error type

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::{debug, error};

/// Single entry in an error response body.
///
/// Every error the API emits uses the same envelope:
/// `{"detail": [{"type", "loc", "msg", "input"?, "ctx"?}]}`.
/// Custom application errors carry exactly one entry; request-shape
/// validation may carry one entry per failed field.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctx: Option<serde_json::Value>,
}

/// Error response envelope: a list of detail entries.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: Vec<ErrorDetail>,
}

impl ErrorBody {
    /// Build a one-entry body for a custom application error.
    pub fn single(kind: &str, loc: &[&str], msg: impl Into<String>) -> Self {
        Self {
            detail: vec![ErrorDetail {
                kind: kind.to_string(),
                loc: loc.iter().map(|s| s.to_string()).collect(),
                msg: msg.into(),
                input: None,
                ctx: None,
            }],
        }
    }

    /// Build a body from request-shape validation failures, one entry per
    /// failed field.
    pub fn from_validation(errors: &validator::ValidationErrors) -> Self {
        let mut detail = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for err in field_errors {
                detail.push(ErrorDetail {
                    kind: err.code.to_string(),
                    loc: vec!["body".to_string(), field.to_string()],
                    msg: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for field '{}'.", field)),
                    input: None,
                    ctx: None,
                });
            }
        }
        Self { detail }
    }
}

/// Top-level error type for handlers outside the user/auth modules.
///
/// Those modules carry their own error enums; anything that only needs
/// request validation plus store errors returns this one.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request shape, HTTP 422
    Validation(validator::ValidationErrors),

    /// Database operation failure, HTTP 500, detail never exposed
    Database(sqlx::Error),

    /// Any other internal failure, HTTP 500, detail never exposed
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(errors) => {
                debug!("request validation failed: {:?}", errors);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorBody::from_validation(errors),
                )
            }
            ApiError::Database(db_error) => {
                error!("database error: {:?}", db_error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::single("internal_error", &[], "An internal server error occurred."),
                )
            }
            ApiError::Internal(msg) => {
                error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::single("internal_error", &[], "An internal server error occurred."),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        ApiError::Database(error)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_entry_body_shape() {
        let body = ErrorBody::single(
            "already_registered_email",
            &["body", "email"],
            "This email is already registered.",
        );
        let json = serde_json::to_value(&body).unwrap();

        let detail = json.get("detail").unwrap().as_array().unwrap();
        assert_eq!(detail.len(), 1);
        assert_eq!(detail[0]["type"], "already_registered_email");
        assert_eq!(detail[0]["loc"][0], "body");
        assert_eq!(detail[0]["loc"][1], "email");
        assert_eq!(detail[0]["msg"], "This email is already registered.");
        // input/ctx are omitted when absent
        assert!(detail[0].get("input").is_none());
        assert!(detail[0].get("ctx").is_none());
    }

    #[test]
    fn test_validation_body_has_entry_per_field() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(email)]
            email: String,
        }

        let probe = Probe {
            email: "not-an-email".to_string(),
        };
        let errors = probe.validate().unwrap_err();
        let body = ErrorBody::from_validation(&errors);

        assert_eq!(body.detail.len(), 1);
        assert_eq!(body.detail[0].kind, "email");
        assert_eq!(body.detail[0].loc, vec!["body", "email"]);
    }
}
