use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("token has no payload segment")]
    Malformed,

    #[error("payload is not base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not a claims object: {0}")]
    Json(#[from] serde_json::Error),
}

/// Claims the portal reads from a session token.
///
/// Only `exp` is required. `sub` may be any JSON value and every other
/// claim is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenClaims {
    /// Expiry, seconds since the epoch.
    pub exp: i64,
    #[serde(default)]
    pub sub: Option<Value>,
}

impl TokenClaims {
    /// The subject as text, when it is a string or a number.
    pub fn subject(&self) -> Option<String> {
        match self.sub.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Valid strictly before `exp`; there is no grace period.
    pub fn is_live_at(&self, now: i64) -> bool {
        self.exp > now
    }
}

/// Decode the payload (second dot-separated segment) without validation.
///
/// The signature is not checked. Both base64 alphabets are accepted and
/// padding is optional.
pub fn decode_claims(token: &str) -> Result<TokenClaims, DecodeError> {
    let payload = token.split('.').nth(1).ok_or(DecodeError::Malformed)?;

    let bytes = match URL_SAFE_LENIENT.decode(payload) {
        Ok(bytes) => bytes,
        Err(_) => STANDARD_LENIENT.decode(payload)?,
    };

    Ok(serde_json::from_slice(&bytes)?)
}
