use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use super::auth::INVALID_TOKEN;
use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::Role;

/// Admin gate: composes strictly after `verify_token`, looks the caller up
/// by the verified email claim, and only lets requests from stored admins
/// through.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    require_role(Role::Admin, "admin", state, request, next).await
}

/// Instructor gate, same shape as the admin gate.
pub async fn require_instructor(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    require_role(Role::Instructor, "instructor", state, request, next).await
}

async fn require_role(
    role: Role,
    key: &'static str,
    state: AppState,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // The identity gate must have decoded the claims already
    let email = request
        .extensions()
        .get::<Claims>()
        .map(|claims| claims.email.clone())
        .ok_or_else(|| ApiError::unauthorized(INVALID_TOKEN))?;

    let user = state.store.find_user(&email).await?;
    let granted = user.map(|u| u.role == role).unwrap_or(false);

    if !granted {
        tracing::warn!("Role check failed: '{}' does not hold the {} role", email, key);
        // Soft denial, and terminal: the handler never runs
        return Ok((StatusCode::OK, Json(json!({ (key): false }))).into_response());
    }

    Ok(next.run(request).await)
}
