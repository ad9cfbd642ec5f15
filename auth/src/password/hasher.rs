use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use argon2::Argon2;
use sha2::Digest;
use sha2::Sha256;

use super::credential::Credential;
use super::credential::HashAlgorithm;
use super::errors::PasswordError;
use crate::crypto::constant_time_str_eq;

const SALT_LENGTH: usize = 16;
const SALT_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
// Largest multiple of 36 that fits in a byte; higher draws are rejected.
const SALT_REJECTION_BOUND: u8 = 252;
const DIGEST_LENGTH: usize = 32;

/// Password hashing implementation.
///
/// New credentials use Argon2id with a 16 character alphanumeric salt drawn
/// from the operating system RNG and a 64 character hex digest. Verification
/// follows the algorithm recorded in the stored credential, so legacy SHA-256
/// credentials keep working.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Credential holding the salt and the hex digest
    ///
    /// # Errors
    /// * `SaltGenerationFailed` - Operating system RNG is unavailable
    /// * `HashingFailed` - Digest computation failed
    pub fn hash(&self, password: &str) -> Result<Credential, PasswordError> {
        let salt = generate_salt()?;
        let digest = digest(HashAlgorithm::Argon2id, password, &salt)?;
        Ok(Credential::new(HashAlgorithm::Argon2id, salt, digest))
    }

    /// Verify a password against a stored credential string.
    ///
    /// Fails closed: a malformed credential yields `false`.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        match Credential::parse(stored) {
            Some(credential) => self.verify_credential(password, &credential),
            None => false,
        }
    }

    /// Verify a password against a parsed credential.
    pub fn verify_credential(&self, password: &str, credential: &Credential) -> bool {
        match digest(credential.algorithm(), password, credential.salt()) {
            Ok(digest) => constant_time_str_eq(&digest, credential.digest()),
            Err(e) => {
                tracing::warn!(error = %e, "Password digest failed during verification");
                false
            }
        }
    }
}

fn digest(algorithm: HashAlgorithm, password: &str, salt: &str) -> Result<String, PasswordError> {
    match algorithm {
        HashAlgorithm::Argon2id => {
            let mut output = [0u8; DIGEST_LENGTH];
            Argon2::default()
                .hash_password_into(password.as_bytes(), salt.as_bytes(), &mut output)
                .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
            Ok(hex::encode(output))
        }
        HashAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(salt.as_bytes());
            hasher.update(password.as_bytes());
            Ok(hex::encode(hasher.finalize()))
        }
    }
}

fn generate_salt() -> Result<String, PasswordError> {
    let mut salt = String::with_capacity(SALT_LENGTH);
    let mut buffer = [0u8; SALT_LENGTH * 2];

    while salt.len() < SALT_LENGTH {
        OsRng
            .try_fill_bytes(&mut buffer)
            .map_err(|e| PasswordError::SaltGenerationFailed(e.to_string()))?;

        for byte in buffer
            .iter()
            .copied()
            .filter(|byte| *byte < SALT_REJECTION_BOUND)
            .take(SALT_LENGTH - salt.len())
        {
            salt.push(SALT_ALPHABET[usize::from(byte % 36)] as char);
        }
    }

    Ok(salt)
}
