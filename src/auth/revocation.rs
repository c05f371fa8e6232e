// Refresh-token revocation store
//
// Tracks currently-valid refresh tokens in Redis under
// `user:<id>:refresh:<sha256>`, with TTL equal to the refresh lifetime so
// entries self-expire in lockstep with the token's own expiry claim. Only
// the SHA-256 hash of a token is ever stored.

use redis::{aio::ConnectionManager, AsyncCommands};
use sha2::{Digest, Sha256};

use crate::auth::error::AuthError;

#[derive(Clone)]
pub struct RevocationStore {
    conn: ConnectionManager,
}

impl RevocationStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    /// SHA-256 hash of a token's encoded form, hex-encoded
    fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn key(user_id: i32, token_hash: &str) -> String {
        format!("user:{}:refresh:{}", user_id, token_hash)
    }

    /// Mark a refresh token as currently valid for a user. The entry expires
    /// after `ttl_seconds`, which must equal the refresh-token lifetime.
    pub async fn register(
        &self,
        user_id: i32,
        token: &str,
        ttl_seconds: i64,
    ) -> Result<(), AuthError> {
        let key = Self::key(user_id, &Self::hash_token(token));
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(key, "1", ttl_seconds as u64).await?;
        Ok(())
    }

    /// Consume a refresh token: delete its entry and report whether it was
    /// present. DEL is atomic, so two concurrent uses of the same token
    /// cannot both observe `true`.
    pub async fn consume(&self, user_id: i32, token: &str) -> Result<bool, AuthError> {
        let key = Self::key(user_id, &Self::hash_token(token));
        let mut conn = self.conn.clone();
        let removed: i64 = conn.del(key).await?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_shape() {
        let hash = RevocationStore::hash_token("some-token");
        let key = RevocationStore::key(7, &hash);
        assert_eq!(key, format!("user:7:refresh:{}", hash));
    }

    #[test]
    fn test_hash_is_sha256_hex() {
        let hash = RevocationStore::hash_token("some-token");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        // never the raw token
        assert_ne!(hash, "some-token");
    }

    #[test]
    fn test_hash_is_deterministic_and_collision_resistant_on_inputs() {
        assert_eq!(
            RevocationStore::hash_token("token-a"),
            RevocationStore::hash_token("token-a")
        );
        assert_ne!(
            RevocationStore::hash_token("token-a"),
            RevocationStore::hash_token("token-b")
        );
    }
}
