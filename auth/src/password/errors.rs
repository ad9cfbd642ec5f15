use thiserror::Error;

/// Error type for password operations.
///
/// Verification never produces one of these; it answers `false` instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Salt generation failed: {0}")]
    SaltGenerationFailed(String),

    #[error("Malformed credential: expected `salt:digest`")]
    MalformedCredential,
}
