use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth;
use crate::error::ApiError;
use crate::state::AppState;

/// Fixed client-facing message for every identity-gate failure. The real
/// reason only goes to the log.
pub const INVALID_TOKEN: &str = "Invalid Token";

/// Identity gate: validates the bearer token and attaches the decoded claims
/// to the request for downstream gates and handlers. Purely cryptographic
/// and temporal; never consults the store.
pub async fn verify_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(|reason| {
        tracing::debug!("Rejected request: {}", reason);
        ApiError::unauthorized(INVALID_TOKEN)
    })?;

    let claims = auth::decode_token(token, &state.token_secret).map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        ApiError::unauthorized(INVALID_TOKEN)
    })?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get("authorization")
        .ok_or("missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Authorization header is not valid UTF-8")?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must use the Bearer scheme")?;

    if token.trim().is_empty() {
        return Err("empty bearer token");
    }

    Ok(token)
}
