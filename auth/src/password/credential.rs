use std::fmt;
use std::str::FromStr;

use super::errors::PasswordError;

/// Prefix marking an Argon2id credential. Untagged credentials are legacy SHA-256.
const ARGON2ID_TAG: &str = "argon2id$";

/// Digest function applied to salt and password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    /// Argon2id with default parameters, 32-byte output.
    #[default]
    Argon2id,

    /// Single SHA-256 over `salt ++ password`.
    ///
    /// Never produced for new credentials; kept so older stored credentials
    /// still verify.
    Sha256,
}

/// Stored form of a password: the algorithm, the salt and the digest
/// computed from them.
///
/// Serialized as `argon2id$salt:digest`, or as a bare `salt:digest` for
/// legacy SHA-256 credentials. Salt and digest are always non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    algorithm: HashAlgorithm,
    salt: String,
    digest: String,
}

impl Credential {
    pub(crate) fn new(algorithm: HashAlgorithm, salt: String, digest: String) -> Self {
        Self {
            algorithm,
            salt,
            digest,
        }
    }

    /// Parse a stored credential.
    ///
    /// Returns `None` when the salt or digest is missing or empty.
    pub fn parse(stored: &str) -> Option<Self> {
        let (algorithm, rest) = match stored.strip_prefix(ARGON2ID_TAG) {
            Some(rest) => (HashAlgorithm::Argon2id, rest),
            None => (HashAlgorithm::Sha256, stored),
        };

        let (salt, digest) = rest.split_once(':')?;
        if salt.is_empty() || digest.is_empty() {
            return None;
        }
        Some(Self::new(algorithm, salt.to_string(), digest.to_string()))
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.algorithm {
            HashAlgorithm::Argon2id => write!(f, "{}{}:{}", ARGON2ID_TAG, self.salt, self.digest),
            HashAlgorithm::Sha256 => write!(f, "{}:{}", self.salt, self.digest),
        }
    }
}

impl FromStr for Credential {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(PasswordError::MalformedCredential)
    }
}
