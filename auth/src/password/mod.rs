pub mod credential;
pub mod errors;
pub mod hasher;

pub use credential::Credential;
pub use credential::HashAlgorithm;
pub use errors::PasswordError;
pub use hasher::PasswordHasher;
