// handlers/users.rs - user registration, listing, role checks, role grants

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{NewUser, Role, UpdateReport, UserRecord};

/// GET /users - full user listing. Admin-gated at the router.
pub async fn users_get(State(state): State<AppState>) -> Result<Json<Vec<UserRecord>>, ApiError> {
    let users = state.store.list_users().await?;
    Ok(Json(users))
}

/// POST /users - register a user unless the email is already taken.
///
/// Re-registration is not an error: the client gets a 200 notice so a
/// returning user can log straight in.
pub async fn users_post(
    State(state): State<AppState>,
    Json(new_user): Json<NewUser>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if state.store.find_user(&new_user.email).await?.is_some() {
        return Ok((StatusCode::OK, Json(json!({ "message": "user already exists" }))));
    }

    let user = state.store.insert_user(new_user).await?;
    Ok((StatusCode::CREATED, Json(json!({ "insertedId": user.id }))))
}

/// GET /users/admin/:email - does the caller hold the admin role?
///
/// Answers for the caller only: when the path email is not the token's
/// email the answer is `false` without touching the store.
pub async fn admin_get(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>, ApiError> {
    let granted = role_check(&state, &claims, &email, Role::Admin).await?;
    Ok(Json(json!({ "admin": granted })))
}

/// GET /users/instructor/:email - does the caller hold the instructor role?
pub async fn instructor_get(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>, ApiError> {
    let granted = role_check(&state, &claims, &email, Role::Instructor).await?;
    Ok(Json(json!({ "instructor": granted })))
}

async fn role_check(
    state: &AppState,
    claims: &Claims,
    email: &str,
    role: Role,
) -> Result<bool, ApiError> {
    if claims.email != email {
        return Ok(false);
    }

    let user = state.store.find_user(email).await?;
    Ok(user.map(|u| u.role == role).unwrap_or(false))
}

/// PATCH /users/:id/admin - grant the admin role. Admin-gated at the router.
pub async fn admin_patch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UpdateReport>, ApiError> {
    let report = state.store.assign_role(id, Role::Admin).await?;
    Ok(Json(report))
}

/// PATCH /users/:id/instructor - grant the instructor role. Admin-gated.
pub async fn instructor_patch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UpdateReport>, ApiError> {
    let report = state.store.assign_role(id, Role::Instructor).await?;
    Ok(Json(report))
}
