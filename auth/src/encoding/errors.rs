use thiserror::Error;

/// Error type for base64url decoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid base64url character {character:?} at index {index}")]
    InvalidCharacter { index: usize, character: char },

    #[error("Invalid base64url length: {0}")]
    InvalidLength(usize),

    #[error("Malformed base64 input: {0}")]
    Malformed(String),

    #[error("Decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}
