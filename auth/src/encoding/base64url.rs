use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::errors::DecodeError;

/// Encode bytes as unpadded base64url text.
///
/// Standard base64 with `+` mapped to `-`, `/` mapped to `_` and the
/// trailing `=` padding removed, so the output is safe inside URLs and
/// cookie values.
///
/// # Arguments
/// * `input` - Bytes to encode (usually UTF-8 JSON)
///
/// # Returns
/// URL-safe encoded string
pub fn encode(input: impl AsRef<[u8]>) -> String {
    STANDARD
        .encode(input)
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

/// Decode base64url text back into bytes.
///
/// Padding is optional on input and restored before decoding.
///
/// # Arguments
/// * `input` - Base64url encoded text
///
/// # Returns
/// Decoded bytes
///
/// # Errors
/// * `InvalidCharacter` - Input contains a symbol outside the base64url alphabet
/// * `InvalidLength` - Input length can never be produced by an encoder
/// * `Malformed` - Trailing bits are non-canonical
pub fn decode(input: &str) -> Result<Vec<u8>, DecodeError> {
    let trimmed = input.trim_end_matches('=');

    if let Some((index, character)) = trimmed
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(DecodeError::InvalidCharacter { index, character });
    }

    if trimmed.len() % 4 == 1 {
        return Err(DecodeError::InvalidLength(trimmed.len()));
    }

    let mut standard: String = trimmed
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    while standard.len() % 4 != 0 {
        standard.push('=');
    }

    STANDARD
        .decode(standard)
        .map_err(|e| DecodeError::Malformed(e.to_string()))
}

/// Decode base64url text into a UTF-8 string.
///
/// # Errors
/// * Any error from [`decode`]
/// * `InvalidUtf8` - Decoded bytes are not valid UTF-8
pub fn decode_to_string(input: &str) -> Result<String, DecodeError> {
    let bytes = decode(input)?;
    String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)
}
