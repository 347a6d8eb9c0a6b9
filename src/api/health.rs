use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::database::DocumentStore;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service and store are reachable", body = HealthResponse),
        (status = 503, description = "Store did not answer a ping", body = HealthResponse)
    )
)]
pub async fn health_check(db: web::Data<dyn DocumentStore>) -> HttpResponse {
    let store_ok = match db.ping().await {
        Ok(()) => true,
        Err(e) => {
            log::warn!("⚠️  Health check: store ping failed: {}", e);
            false
        }
    };

    let body = HealthResponse {
        status: if store_ok { "healthy" } else { "degraded" }.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    };

    if store_ok {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
