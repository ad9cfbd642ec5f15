//! Authentication core library
//!
//! Provides the stateless authentication primitives used by the user service:
//! - Password hashing into salted Argon2id credentials, with legacy SHA-256
//!   credentials still accepted on verification
//! - Signed, time-bounded identity tokens (HMAC-SHA256)
//! - Base64url helpers shared by both
//! - Authentication coordination
//!
//! All operations are synchronous and hold no mutable state; the signing
//! secret is injected by the caller.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let credential = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &credential.to_string()));
//! assert!(!hasher.verify("my_password", "onlysalt"));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, TokenCodec};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let claims = Claims::new("user123", "alice@example.com", "Alice");
//! let token = codec.issue(&claims, 1_700_000_000).unwrap();
//! let decoded = codec.verify(&token, 1_700_000_000).unwrap();
//! assert_eq!(decoded.user_id, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{current_timestamp, Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//!
//! // Register: hash password
//! let credential = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let claims = Claims::new("user123", "alice@example.com", "Alice");
//! let now = current_timestamp();
//! let result = auth
//!     .authenticate("password123", &credential.to_string(), &claims, now)
//!     .unwrap();
//!
//! // Every later request: validate token
//! let decoded = auth.verify_token(&result.access_token, now).unwrap();
//! assert_eq!(decoded.email, "alice@example.com");
//! ```

pub mod authenticator;
pub mod crypto;
pub mod encoding;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use encoding::DecodeError;
pub use password::Credential;
pub use password::HashAlgorithm;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::current_timestamp;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
