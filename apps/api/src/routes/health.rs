use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::db;
use crate::state::AppState;

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Resumio API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// GET /api/health
/// Reports database reachability as a boolean only; no connection details.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let db_connected = match &state.db {
        Some(pool) => db::ping(pool).await,
        None => false,
    };

    Json(json!({
        "status": "ok",
        "env": state.config.env,
        "db": db_connected
    }))
}
