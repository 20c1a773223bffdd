// handlers/classes.rs - class listing and creation

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{ClassRecord, NewClass};

/// GET /classes - public class catalog.
pub async fn classes_get(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClassRecord>>, ApiError> {
    let classes = state.store.list_classes().await?;
    Ok(Json(classes))
}

/// POST /classes - publish a class. Instructor-gated at the router.
pub async fn classes_post(
    State(state): State<AppState>,
    Json(new_class): Json<NewClass>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let class = state.store.insert_class(new_class).await?;
    Ok((StatusCode::CREATED, Json(json!({ "insertedId": class.id }))))
}
