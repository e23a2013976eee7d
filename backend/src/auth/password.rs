//! Password hashing using bcrypt
//!
//! Digests are self-describing (`$2b$<cost>$<salt><hash>`), so verification
//! needs nothing besides the stored string.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. Request handlers go through the
//! `*_async` variants, which run on the blocking thread pool.

use thiserror::Error;

/// bcrypt work factor (2^10 rounds)
pub const BCRYPT_COST: u32 = 10;

/// Password hashing failures
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Malformed password digest")]
    MalformedDigest,

    #[error("Failed to hash password: {0}")]
    Hashing(#[source] bcrypt::BcryptError),

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password with a fresh random salt (blocking operation)
    pub fn hash(plaintext: &str) -> Result<String, PasswordError> {
        bcrypt::hash(plaintext, BCRYPT_COST).map_err(PasswordError::Hashing)
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(plaintext: String) -> Result<String, PasswordError> {
        tokio::task::spawn_blocking(move || Self::hash(&plaintext)).await?
    }

    /// Check a plaintext against a stored digest (blocking operation)
    ///
    /// A mismatch is `Ok(false)`; only an unparseable digest is an error.
    pub fn verify(digest: &str, plaintext: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(plaintext, digest).map_err(|_| PasswordError::MalformedDigest)
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(digest: String, plaintext: String) -> Result<bool, PasswordError> {
        tokio::task::spawn_blocking(move || Self::verify(&digest, &plaintext)).await?
    }
}
