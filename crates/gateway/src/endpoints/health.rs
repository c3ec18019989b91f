//! # GET /health

use axum::Json;
use webauth_types::HealthResponse;

/// GET /health — 死活監視。認証なし。
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
