use axum::{response::Json as ResponseJson, routing::get, Json, Router};

use crate::models::{HealthResponse, HomeResponse};

pub fn router() -> Router {
    Router::new()
        .route("/", get(home))
        .route("/api/health", get(health_check))
}

async fn home() -> ResponseJson<HomeResponse> {
    Json(HomeResponse {
        message: "Backend is running".to_string(),
    })
}

async fn health_check() -> ResponseJson<HealthResponse> {
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    Json(response)
}
