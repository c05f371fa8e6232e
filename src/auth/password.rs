// Password hashing and verification

use bcrypt::{hash, verify, DEFAULT_COST};

/// Password service for one-way hashing and verification.
/// Timing-safe comparison is bcrypt's responsibility.
pub struct PasswordService;

impl PasswordService {
    /// Hash a plaintext password with bcrypt
    pub fn hash(password: &str) -> Result<String, bcrypt::BcryptError> {
        hash(password, DEFAULT_COST)
    }

    /// Verify a plaintext password against a stored hash
    pub fn verify(password: &str, password_hash: &str) -> Result<bool, bcrypt::BcryptError> {
        verify(password, password_hash)
    }
}
