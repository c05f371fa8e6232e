// Session flows: login and refresh-token rotation

use tracing::{debug, info};

use crate::auth::{
    error::AuthError,
    models::TokenPair,
    password::PasswordService,
    revocation::RevocationStore,
    token::{TokenKind, TokenService},
};
use crate::users::{repository::UserRepository, UserRole};

/// Orchestrates credential verification and the token lifecycle.
/// No session state is kept beyond the revocation entry; access tokens are
/// stateless and cannot be revoked before expiry.
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    revocations: RevocationStore,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: UserRepository, revocations: RevocationStore, tokens: TokenService) -> Self {
        Self {
            users,
            revocations,
            tokens,
        }
    }

    /// Verify credentials, issue a token pair and register the refresh token.
    /// An unknown username and a wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AuthError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let verified = PasswordService::verify(password, &user.password_hash)
            .map_err(AuthError::PasswordHash)?;
        if !verified {
            return Err(AuthError::InvalidCredentials);
        }

        let role: UserRole = user.role.parse().map_err(AuthError::InvalidRole)?;

        let (access_token, refresh_token) = self.tokens.issue_pair(user.id, role)?;
        self.revocations
            .register(
                user.id,
                &refresh_token,
                self.tokens.lifetime(TokenKind::Refresh),
            )
            .await?;

        info!(user_id = user.id, "login succeeded");
        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// Rotate a refresh token: validate it, consume its revocation entry,
    /// then issue and register a replacement pair.
    ///
    /// The old entry is deleted before any new token is issued, so a
    /// rotated-out token can never be observed as still valid after this
    /// call returns.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self.tokens.decode(refresh_token, TokenKind::Refresh)?;
        let user_id = claims.sub.ok_or(AuthError::MissingSubject)?;

        // Atomic delete reports whether the entry existed; a replayed or
        // forged token fails here with one undifferentiated error.
        if !self.revocations.consume(user_id, refresh_token).await? {
            debug!(user_id, "refresh token missing from revocation store");
            return Err(AuthError::RefreshTokenConsumed);
        }

        let (access_token, new_refresh_token) = self.tokens.issue_pair(user_id, claims.role)?;
        self.revocations
            .register(
                user_id,
                &new_refresh_token,
                self.tokens.lifetime(TokenKind::Refresh),
            )
            .await?;

        info!(user_id, "refresh token rotated");
        Ok(TokenPair::new(access_token, new_refresh_token))
    }
}
