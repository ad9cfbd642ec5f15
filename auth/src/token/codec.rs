use chrono::Utc;

use super::claims::Claims;
use super::errors::TokenError;
use super::header::TokenHeader;
use super::signer::Signer;
use crate::crypto::constant_time_str_eq;
use crate::encoding;

/// Default token lifetime: 24 hours.
pub const DEFAULT_TOKEN_LIFETIME_SECONDS: i64 = 24 * 60 * 60;

/// Current Unix timestamp in seconds.
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Token codec for issuing and verifying signed identity tokens.
///
/// Tokens are three base64url segments joined by `.`: the JSON header, the
/// JSON claims and the signature over the first two segments. Verification
/// is stateless; a token stays valid until its `exp` or until the secret
/// changes.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    signer: Signer,
    lifetime_seconds: i64,
}

impl TokenCodec {
    /// Create a codec with the default 24 hour lifetime.
    ///
    /// # Arguments
    /// * `secret` - Shared signing secret (loaded from configuration, never hardcoded)
    ///
    /// # Errors
    /// * `InvalidKey` - Secret is empty
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        Self::with_lifetime(secret, DEFAULT_TOKEN_LIFETIME_SECONDS)
    }

    /// Create a codec with a custom token lifetime.
    ///
    /// # Errors
    /// * `InvalidKey` - Secret is empty
    /// * `InvalidLifetime` - Lifetime is not positive
    pub fn with_lifetime(secret: &[u8], lifetime_seconds: i64) -> Result<Self, TokenError> {
        if lifetime_seconds <= 0 {
            return Err(TokenError::InvalidLifetime(lifetime_seconds));
        }

        Ok(Self {
            signer: Signer::new(secret)?,
            lifetime_seconds,
        })
    }

    pub fn lifetime_seconds(&self) -> i64 {
        self.lifetime_seconds
    }

    /// Issue a token for `claims` at time `now`.
    ///
    /// Any `iat`/`exp` already present on `claims` are replaced by `now` and
    /// `now + lifetime`.
    ///
    /// # Errors
    /// * `InvalidLifetime` - `now + lifetime` overflows
    /// * `EncodingFailed` - Header or claims could not be serialized
    pub fn issue(&self, claims: &Claims, now: i64) -> Result<String, TokenError> {
        self.issue_with_claims(claims, now).map(|(token, _)| token)
    }

    /// Issue a token and return it together with the claims it carries.
    ///
    /// # Errors
    /// * `InvalidLifetime` - `now + lifetime` overflows
    /// * `EncodingFailed` - Header or claims could not be serialized
    pub fn issue_with_claims(
        &self,
        claims: &Claims,
        now: i64,
    ) -> Result<(String, Claims), TokenError> {
        let expiration = now
            .checked_add(self.lifetime_seconds)
            .ok_or(TokenError::InvalidLifetime(self.lifetime_seconds))?;
        let claims = claims
            .clone()
            .with_issued_at(now)
            .with_expiration(expiration);

        let header_json = serde_json::to_vec(&TokenHeader::default())
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;
        let claims_json =
            serde_json::to_vec(&claims).map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        let signing_input = format!(
            "{}.{}",
            encoding::encode(header_json),
            encoding::encode(claims_json)
        );
        let signature = self.sign(&signing_input);

        Ok((format!("{}.{}", signing_input, signature), claims))
    }

    /// Compute the signature segment for `data`.
    pub fn sign(&self, data: &str) -> String {
        self.signer.sign(data)
    }

    /// Verify a token and return its claims.
    ///
    /// # Arguments
    /// * `token` - Token string as issued by [`TokenCodec::issue`]
    /// * `now` - Current Unix timestamp
    ///
    /// # Errors
    /// * `MalformedToken` - Wrong segment count, or undecodable header or claims
    /// * `BadSignature` - Signature does not match the header and claims
    /// * `TokenExpired` - `now` is at or past the `exp` claim
    pub fn verify(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        let [header, payload, signature] = segments.as_slice() else {
            return Err(TokenError::MalformedToken(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        };

        if header.is_empty() || payload.is_empty() || signature.is_empty() {
            return Err(TokenError::MalformedToken("empty segment".to_string()));
        }

        let expected = self.sign(&format!("{}.{}", header, payload));
        if !constant_time_str_eq(&expected, signature) {
            return Err(TokenError::BadSignature);
        }

        let _header: TokenHeader = decode_segment(header, "header")?;
        let claims: Claims = decode_segment(payload, "payload")?;

        if claims.is_expired(now) {
            return Err(TokenError::TokenExpired);
        }

        Ok(claims)
    }
}

fn decode_segment<T: for<'de> serde::Deserialize<'de>>(
    segment: &str,
    name: &str,
) -> Result<T, TokenError> {
    let bytes = encoding::decode(segment)
        .map_err(|e| TokenError::MalformedToken(format!("{}: {}", name, e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::MalformedToken(format!("{}: {}", name, e)))
}
