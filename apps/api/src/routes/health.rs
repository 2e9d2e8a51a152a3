use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "outreach-api"
    }))
}

/// GET /
/// Lists the API entry points.
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "message": "Prospect Outreach API",
        "endpoints": { "ai": "/api/ai" }
    }))
}
