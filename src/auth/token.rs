// JWT token issuance and validation

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;
use crate::users::UserRole;

/// Which lifetime a token was issued with. Decode failures carry the kind so
/// refresh-token errors are reported as such.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims structure.
///
/// `sub` stays optional at the serde level so a well-formed token without a
/// subject decodes cleanly and is rejected with a distinct error by callers.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Option<i32>,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

/// Token service for signing and validating claims. Holds only the immutable
/// secret and the configured lifetimes; performs no I/O.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    access_duration: i64,  // in seconds
    refresh_duration: i64, // in seconds
}

impl TokenService {
    pub fn new(secret: String, access_expire_minutes: i64, refresh_expire_days: i64) -> Self {
        Self {
            secret,
            access_duration: access_expire_minutes * 60,
            refresh_duration: refresh_expire_days * 24 * 60 * 60,
        }
    }

    /// Configured lifetime in seconds for the given kind
    pub fn lifetime(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.access_duration,
            TokenKind::Refresh => self.refresh_duration,
        }
    }

    /// Issue a signed token for a user: `iat = now`, `exp = now + lifetime(kind)`
    pub fn issue(&self, user_id: i32, role: UserRole, kind: TokenKind) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Some(user_id),
            role,
            iat: now,
            exp: now + self.lifetime(kind),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(AuthError::TokenCreation)
    }

    /// Issue an access and a refresh token for the same subject
    pub fn issue_pair(&self, user_id: i32, role: UserRole) -> Result<(String, String), AuthError> {
        let access = self.issue(user_id, role, TokenKind::Access)?;
        let refresh = self.issue(user_id, role, TokenKind::Refresh)?;
        Ok((access, refresh))
    }

    /// Verify signature, algorithm and expiry, and return the claims.
    /// Expiry and signature failures map to distinct errors tagged with the
    /// token kind.
    pub fn decode(&self, token: &str, kind: TokenKind) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired(kind),
            _ => AuthError::InvalidToken(kind),
        })
    }
}
