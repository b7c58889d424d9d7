pub mod identity;
pub mod jwt;

pub use identity::{clean_for_handle, derive_email, derive_identity, DerivedIdentity};
pub use jwt::{decode_claims, DecodeError, TokenClaims};
