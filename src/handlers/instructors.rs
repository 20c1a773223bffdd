// handlers/instructors.rs - instructor directory

use axum::{extract::State, response::Json};

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::InstructorRecord;

/// GET /instructors - public instructor directory. Records are seeded
/// out-of-band; the API only reads them.
pub async fn instructors_get(
    State(state): State<AppState>,
) -> Result<Json<Vec<InstructorRecord>>, ApiError> {
    let instructors = state.store.list_instructors().await?;
    Ok(Json(instructors))
}
