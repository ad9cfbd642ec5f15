use crate::password::Credential;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::Claims;
use crate::token::TokenCodec;
use crate::token::TokenError;

/// Authentication coordinator combining password verification and token issuance.
///
/// Exposes the four stateless operations used by the hosting service:
/// hash a password, verify a password, issue a token, verify a token.
#[derive(Debug, Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,

    /// Claims embedded in the token, including `iat` and `exp`
    pub claims: Claims,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator with the default token lifetime.
    ///
    /// # Arguments
    /// * `token_secret` - Secret key for token signing
    ///
    /// # Errors
    /// * `InvalidKey` - Secret is empty
    pub fn new(token_secret: &[u8]) -> Result<Self, TokenError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(token_secret)?,
        })
    }

    /// Create a new authenticator with a custom token lifetime.
    ///
    /// # Errors
    /// * `InvalidKey` - Secret is empty
    /// * `InvalidLifetime` - Lifetime is not positive
    pub fn with_lifetime(token_secret: &[u8], lifetime_seconds: i64) -> Result<Self, TokenError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::with_lifetime(token_secret, lifetime_seconds)?,
        })
    }

    pub fn token_lifetime_seconds(&self) -> i64 {
        self.token_codec.lifetime_seconds()
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<Credential, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored credential.
    ///
    /// Never fails; malformed credentials and mismatches both return `false`.
    pub fn verify_password(&self, password: &str, stored_credential: &str) -> bool {
        self.password_hasher.verify(password, stored_credential)
    }

    /// Issue a signed token for `claims` at Unix time `now`.
    ///
    /// # Errors
    /// * `TokenError` - Token generation failed
    pub fn issue_token(&self, claims: &Claims, now: i64) -> Result<String, TokenError> {
        self.token_codec.issue(claims, now)
    }

    /// Validate a token at Unix time `now` and return its claims.
    ///
    /// The specific failure is logged at debug level; callers facing untrusted
    /// clients should report every error the same way.
    ///
    /// # Errors
    /// * `MalformedToken`, `BadSignature` or `TokenExpired`
    pub fn verify_token(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        self.token_codec.verify(token, now).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            e
        })
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_credential` - Stored credential string
    /// * `claims` - Identity claims to embed in the token
    /// * `now` - Current Unix timestamp
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenError` - Token generation failed, including a lifetime that
    ///   overflows at `now`
    pub fn authenticate(
        &self,
        password: &str,
        stored_credential: &str,
        claims: &Claims,
        now: i64,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_credential) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let (access_token, claims) = self.token_codec.issue_with_claims(claims, now)?;

        Ok(AuthenticationResult {
            access_token,
            claims,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";
    const NOW: i64 = 1_700_000_000;

    fn authenticator() -> Authenticator {
        Authenticator::new(SECRET).expect("Failed to create authenticator")
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let password = "my_password";
        let credential = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let claims = Claims::new("user123", "alice@example.com", "Alice");
        let result = authenticator
            .authenticate(password, &credential.to_string(), &claims, NOW)
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());
        assert_eq!(result.claims.exp, Some(NOW + 86_400));

        let decoded = authenticator
            .verify_token(&result.access_token, NOW)
            .expect("Token validation failed");
        assert_eq!(decoded, result.claims);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let credential = authenticator.hash_password("my_password").unwrap();
        let claims = Claims::new("user123", "alice@example.com", "Alice");

        let result =
            authenticator.authenticate("wrong_password", &credential.to_string(), &claims, NOW);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_malformed_credential() {
        let authenticator = authenticator();
        let claims = Claims::new("user123", "alice@example.com", "Alice");

        let result = authenticator.authenticate("password", "onlysalt", &claims, NOW);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_issue_and_verify_token() {
        let authenticator = authenticator();
        let claims = Claims::new("user123", "alice@example.com", "Alice");

        let token = authenticator.issue_token(&claims, NOW).unwrap();
        let decoded = authenticator.verify_token(&token, NOW + 10).unwrap();

        assert_eq!(decoded.user_id, "user123");
        assert_eq!(decoded.email, "alice@example.com");
        assert_eq!(decoded.name, "Alice");
    }

    #[test]
    fn test_verify_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.verify_token("invalid.token.here", NOW);
        assert_eq!(result, Err(TokenError::BadSignature));
    }

    #[test]
    fn test_custom_lifetime() {
        let authenticator = Authenticator::with_lifetime(SECRET, 3600).unwrap();
        assert_eq!(authenticator.token_lifetime_seconds(), 3600);

        let claims = Claims::new("user123", "alice@example.com", "Alice");
        let token = authenticator.issue_token(&claims, NOW).unwrap();
        assert_eq!(
            authenticator.verify_token(&token, NOW + 3600),
            Err(TokenError::TokenExpired)
        );
    }

    #[test]
    fn test_authenticate_legacy_sha256_credential() {
        let authenticator = authenticator();
        let claims = Claims::new("user123", "alice@example.com", "Alice");
        let legacy = "a:ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

        let result = authenticator
            .authenticate("bc", legacy, &claims, NOW)
            .expect("Legacy credential should authenticate");
        assert_eq!(
            authenticator.verify_token(&result.access_token, NOW).unwrap(),
            result.claims
        );

        assert!(matches!(
            authenticator.authenticate("bd", legacy, &claims, NOW),
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_lifetime_overflow() {
        let authenticator = Authenticator::with_lifetime(SECRET, i64::MAX).unwrap();
        let credential = authenticator.hash_password("my_password").unwrap();
        let claims = Claims::new("user123", "alice@example.com", "Alice");

        let result =
            authenticator.authenticate("my_password", &credential.to_string(), &claims, NOW);
        assert!(matches!(
            result,
            Err(AuthenticationError::TokenError(TokenError::InvalidLifetime(_)))
        ));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            Authenticator::new(b""),
            Err(TokenError::InvalidKey(_))
        ));
    }
}
