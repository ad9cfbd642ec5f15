pub mod claims;
pub mod codec;
pub mod errors;
pub mod header;
pub mod signer;

pub use claims::Claims;
pub use codec::current_timestamp;
pub use codec::TokenCodec;
pub use codec::DEFAULT_TOKEN_LIFETIME_SECONDS;
pub use errors::TokenError;
pub use header::TokenHeader;
pub use signer::Signer;
