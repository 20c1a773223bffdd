// handlers/auth.rs - POST /jwt token issuance

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::auth::{self, IdentityPayload};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /jwt - sign a one-hour session token over the submitted identity.
///
/// The payload is trusted as-is (authentication happens upstream of this
/// service); every submitted field is carried into the claim set.
pub async fn jwt_post(
    State(state): State<AppState>,
    Json(payload): Json<IdentityPayload>,
) -> Result<Json<Value>, ApiError> {
    let token = auth::issue_token(payload, &state.token_secret).map_err(|e| {
        tracing::error!("Token signing failed: {}", e);
        ApiError::internal_server_error("Failed to issue token")
    })?;

    Ok(Json(json!({ "token": token })))
}
