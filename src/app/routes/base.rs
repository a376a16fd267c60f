use super::timestamp;
use crate::app::AppState;
use crate::{SERVICE_NAME, VERSION};
use actix_web::{web, HttpResponse};
use serde_json::json;

pub const ENDPOINTS: [&str; 14] = [
    "/health",
    "/status",
    "/test-basic",
    "/test-render",
    "/engine",
    "/ingest/min",
    "/ingest/full",
    "/data/collect",
    "/fastturf/run",
    "/data/store",
    "/analysis/psi",
    "/results/top3",
    "/openapi.json",
    "/manifest.json",
];

pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "service": "Bridge API Light",
        "version": VERSION,
        "endpoints": ENDPOINTS,
    }))
}

pub async fn health() -> HttpResponse {
    tracing::info!("Health check");
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": VERSION,
        "timestamp": timestamp(),
    }))
}

pub async fn status(state: web::Data<AppState>) -> HttpResponse {
    tracing::info!("Status check");
    HttpResponse::Ok().json(json!({
        "status": "operational",
        "service": SERVICE_NAME,
        "version": VERSION,
        "backend": state.backend.base_url(),
        "hmac_configured": state.verifier.is_configured(),
        "timestamp": timestamp(),
    }))
}

pub async fn test_basic(state: web::Data<AppState>) -> HttpResponse {
    tracing::info!("Basic bridge test");
    HttpResponse::Ok().json(json!({
        "status": "Bridge OK",
        "service": SERVICE_NAME,
        "backend": state.backend.base_url(),
    }))
}

/// Probes `{backend}/status`; any transport failure is reported as 500.
pub async fn test_render(state: web::Data<AppState>) -> HttpResponse {
    match state.backend.status().await {
        Ok(probe) => {
            tracing::info!("Backend test succeeded - latency: {}ms", probe.latency_ms);
            HttpResponse::Ok().json(json!({
                "status": "OK",
                "backend_status": probe.status_code,
                "latency_ms": probe.latency_ms,
                "hmac_configured": state.verifier.is_configured(),
            }))
        }
        Err(e) => {
            tracing::error!("Backend test failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}
