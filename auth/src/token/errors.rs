use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    MalformedToken(String),

    #[error("Token signature does not match")]
    BadSignature,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Invalid signing key: {0}")]
    InvalidKey(String),

    #[error("Invalid token lifetime: {0} seconds")]
    InvalidLifetime(i64),
}
