use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{account, jobs};
use crate::middleware::require_auth;
use crate::state::AppState;

/// Assembles the full router. Account creation and login stay public; every
/// job route and the profile route sit behind the auth gate.
pub fn app(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/create-account", post(account::create_account))
        .route("/login", post(account::login))
        .route("/logout", post(account::logout));

    let protected = Router::new()
        .route("/get-user", get(account::get_user))
        .route("/add-job", post(jobs::add_job))
        .route("/edit-job/:job_id", put(jobs::edit_job))
        .route("/get-all-jobs", get(jobs::get_all_jobs))
        .route("/delete-job/:job_id", delete(jobs::delete_job))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "data": "Hello" }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now })),
        ),
        Err(err) => {
            tracing::error!("health check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "timestamp": now })),
            )
        }
    }
}
