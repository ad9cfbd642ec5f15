use std::fmt;

use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;

use super::errors::TokenError;
use crate::encoding;

type HmacSha256 = Hmac<Sha256>;

/// Keyed signature over the `header.payload` part of a token.
///
/// HMAC-SHA256 rendered as unpadded base64url. Deterministic for a given
/// secret and input.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha256,
}

impl Signer {
    /// Create a signer from the shared secret.
    ///
    /// # Errors
    /// * `InvalidKey` - Secret is empty
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidKey("secret must not be empty".to_string()));
        }

        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| TokenError::InvalidKey(e.to_string()))?;

        Ok(Self { mac })
    }

    /// Compute the signature segment for `data`.
    pub fn sign(&self, data: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(data.as_bytes());
        encoding::encode(mac.finalize().into_bytes())
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}
