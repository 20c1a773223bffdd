use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Session tokens expire a fixed hour after issuance.
pub const TOKEN_TTL_HOURS: i64 = 1;

/// Identity payload presented at issuance. The login flow upstream has
/// already authenticated it; everything beyond the email rides along
/// verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityPayload {
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Decoded claim set of a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: i64,
    pub iat: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn new(payload: IdentityPayload) -> Self {
        let now = Utc::now();
        let mut extra = payload.extra;
        // Reserved claims are set here, never taken from the payload
        extra.remove("exp");
        extra.remove("iat");

        Self {
            email: payload.email,
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
            iat: now.timestamp(),
            extra,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token signing failed: {0}")]
    Signing(jsonwebtoken::errors::Error),

    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

/// Sign a session token over the identity payload.
pub fn issue_token(payload: IdentityPayload, secret: &str) -> Result<String, AuthError> {
    let claims = Claims::new(payload);
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), &claims, &encoding_key).map_err(AuthError::Signing)
}

/// Verify signature and expiry, returning the decoded claims.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    // A token is invalid the moment its expiry passes
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::Invalid(e),
        }
    })?;

    Ok(token_data.claims)
}
