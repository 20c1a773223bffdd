// app.rs - route table and global middleware

use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Json},
    routing::{get, patch, post},
    Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{auth, classes, instructors, users};
use crate::middleware::{require_admin, require_instructor, verify_token};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/jwt", post(auth::jwt_post))
        .route("/instructors", get(instructors::instructors_get))
        // Gated groups
        .merge(user_routes(state.clone()))
        .merge(class_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn user_routes(state: AppState) -> Router<AppState> {
    // Listing and role grants are for admins; layer order is outermost-last,
    // so the identity gate runs before the role gate.
    let admin_only = Router::new()
        .route("/users", get(users::users_get))
        .route("/users/:id/admin", patch(users::admin_patch))
        .route("/users/:id/instructor", patch(users::instructor_patch))
        .route_layer(from_fn_with_state(state.clone(), require_admin))
        .route_layer(from_fn_with_state(state.clone(), verify_token));

    // Role self-checks only need a verified identity
    let self_checks = Router::new()
        .route("/users/admin/:email", get(users::admin_get))
        .route("/users/instructor/:email", get(users::instructor_get))
        .route_layer(from_fn_with_state(state, verify_token));

    Router::new()
        .route("/users", post(users::users_post))
        .merge(admin_only)
        .merge(self_checks)
}

fn class_routes(state: AppState) -> Router<AppState> {
    let publish = Router::new()
        .route("/classes", post(classes::classes_post))
        .route_layer(from_fn_with_state(state.clone(), require_instructor))
        .route_layer(from_fn_with_state(state, verify_token));

    Router::new()
        .route("/classes", get(classes::classes_get))
        .merge(publish)
}

async fn root() -> &'static str {
    "Sports Gear is running"
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "store": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "store": "unreachable"
                })),
            )
        }
    }
}
