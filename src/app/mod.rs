pub mod routes;

use crate::config::ServerConfig;
use crate::core::backend::HttpBackend;
use crate::core::signature::SignatureVerifier;
use crate::domain::ports::Backend;
use crate::utils::error::{BridgeError, Result};
use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;

pub struct AppState {
    pub config: ServerConfig,
    pub backend: Arc<dyn Backend>,
    pub verifier: SignatureVerifier,
}

impl AppState {
    pub fn new(config: ServerConfig, backend: Arc<dyn Backend>) -> Self {
        let verifier = SignatureVerifier::new(&config.hmac_secret);
        Self {
            config,
            backend,
            verifier,
        }
    }

    /// 使用 reqwest 後端建立狀態
    pub fn with_http_backend(config: ServerConfig) -> Result<Self> {
        let backend = HttpBackend::new(config.backend_url.clone(), config.backend_timeout())?;
        Ok(Self::new(config, Arc::new(backend)))
    }
}

/// 路徑存在但方法不符時回 405，而非落到 404
fn resource(path: &str, route: actix_web::Route) -> actix_web::Resource {
    web::resource(path)
        .route(route)
        .default_service(web::to(routes::method_not_allowed))
}

/// Registers every route plus body limits and the JSON 404 fallback.
pub fn configure(max_body_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::PayloadConfig::new(max_body_bytes))
            .service(resource("/", web::get().to(routes::base::root)))
            .service(resource("/health", web::get().to(routes::base::health)))
            .service(resource("/status", web::get().to(routes::base::status)))
            .service(resource("/test-basic", web::get().to(routes::base::test_basic)))
            .service(resource("/test-render", web::get().to(routes::base::test_render)))
            .service(resource("/engine", web::post().to(routes::engine::engine)))
            .service(resource("/ingest/min", web::post().to(routes::ingest::ingest_min)))
            .service(resource("/ingest/full", web::post().to(routes::ingest::ingest_full)))
            .service(resource("/data/collect", web::post().to(routes::stages::data_collect)))
            .service(resource("/fastturf/run", web::post().to(routes::stages::fastturf_run)))
            .service(resource("/data/store", web::post().to(routes::stages::data_store)))
            .service(resource("/analysis/psi", web::post().to(routes::stages::analysis_psi)))
            .service(resource("/results/top3", web::get().to(routes::stages::results_top3)))
            .service(resource("/openapi.json", web::get().to(routes::docs::openapi)))
            .service(resource("/manifest.json", web::get().to(routes::docs::manifest)))
            .default_service(web::to(not_found));
    }
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "Not found" }))
}

pub async fn run_server(config: ServerConfig) -> Result<()> {
    let bind_address = config.bind_address();
    let max_body_bytes = config.max_body_bytes;
    let state = web::Data::new(AppState::with_http_backend(config)?);

    tracing::info!("🚀 Bridge API listening on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure(max_body_bytes))
    })
    .bind(&bind_address)
    .map_err(|e| BridgeError::ConfigError {
        message: format!("cannot bind {}: {}", bind_address, e),
    })?
    .run()
    .await?;

    tracing::info!("Bridge API stopped");
    Ok(())
}
