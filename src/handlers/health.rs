use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{config::StoreBackend, AppState};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check OK")
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let store = match state.config.store {
        StoreBackend::Postgres { .. } => "postgres",
        StoreBackend::Memory => "memory",
    };

    Json(json!({
        "status": "ok",
        "store": store,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{get_json, test_state};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn reports_store_backend() {
        let (status, body) = get_json(test_state(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("ok"));
        assert_eq!(body["store"], json!("memory"));
    }
}
