// Authentication gate for protected routes

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use sqlx::FromRow;
use tracing::debug;

use crate::auth::{error::AuthError, token::TokenKind};
use crate::users::UserRole;
use crate::AppState;

/// Minimal principal exposed to downstream handlers
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
    pub role: UserRole,
}

/// Projection loaded for the auth gate. The password hash is never selected
/// on this path.
#[derive(Debug, FromRow)]
struct AuthUserRow {
    id: i32,
    username: String,
    role: String,
    is_active: bool,
}

/// Locate the bearer credential: the explicit `access_token` query parameter
/// takes precedence, then the Authorization header, else reject.
fn extract_credential(parts: &Parts) -> Result<String, AuthError> {
    if let Some(token) = parts.uri.query().and_then(credential_from_query) {
        return Ok(token);
    }

    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidBearerFormat)?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::to_string)
        .ok_or(AuthError::InvalidBearerFormat)
}

fn credential_from_query(query: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == "access_token" && !value.is_empty()).then(|| value.to_string())
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let token = extract_credential(parts)?;
        let claims = state.tokens.decode(&token, TokenKind::Access)?;
        let user_id = claims.sub.ok_or(AuthError::MissingSubject)?;

        let row = sqlx::query_as::<_, AuthUserRow>(
            "SELECT id, username, role, is_active FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?;

        // one rejection for both missing and disabled users
        let user = match row {
            Some(user) if user.is_active => user,
            _ => {
                debug!(user_id, "token subject is missing or inactive");
                return Err(AuthError::InactiveOrInvalidUser);
            }
        };

        let role = user.role.parse().map_err(AuthError::InvalidRole)?;

        Ok(CurrentUser {
            id: user.id,
            username: user.username,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_header(auth_value: &str) -> Parts {
        let req = Request::builder()
            .uri("/posts")
            .header(header::AUTHORIZATION, auth_value)
            .body(())
            .unwrap();
        req.into_parts().0
    }

    fn parts_with_uri(uri: &str) -> Parts {
        let req = Request::builder().uri(uri).body(()).unwrap();
        req.into_parts().0
    }

    #[test]
    fn test_missing_credential_is_rejected() {
        let parts = parts_with_uri("/posts");
        assert!(matches!(
            extract_credential(&parts),
            Err(AuthError::MissingAuthHeader)
        ));
    }

    #[test]
    fn test_bearer_header_is_extracted() {
        let parts = parts_with_header("Bearer some.jwt.token");
        assert_eq!(extract_credential(&parts).unwrap(), "some.jwt.token");
    }

    #[test]
    fn test_non_bearer_header_is_rejected() {
        for value in ["Basic dXNlcjpwYXNz", "some.jwt.token", "bearer lowercase"] {
            let parts = parts_with_header(value);
            assert!(matches!(
                extract_credential(&parts),
                Err(AuthError::InvalidBearerFormat)
            ));
        }
    }

    #[test]
    fn test_query_credential_is_extracted() {
        let parts = parts_with_uri("/posts?access_token=some.jwt.token");
        assert_eq!(extract_credential(&parts).unwrap(), "some.jwt.token");
    }

    #[test]
    fn test_query_credential_takes_precedence_over_header() {
        let req = Request::builder()
            .uri("/posts?access_token=from.query.param")
            .header(header::AUTHORIZATION, "Bearer from.header.value")
            .body(())
            .unwrap();
        let parts = req.into_parts().0;

        assert_eq!(extract_credential(&parts).unwrap(), "from.query.param");
    }

    #[test]
    fn test_other_query_params_do_not_count_as_credential() {
        let parts = parts_with_uri("/posts?page=2&access_token=");
        assert!(matches!(
            extract_credential(&parts),
            Err(AuthError::MissingAuthHeader)
        ));
    }
}
