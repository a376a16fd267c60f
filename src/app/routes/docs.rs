use super::engine::SIGNATURE_HEADER;
use crate::app::AppState;
use crate::VERSION;
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::{json, Value};

/// Public base URL: `PUBLIC_BASE_URL` when set, otherwise taken from the request.
fn public_base_url(state: &AppState, req: &HttpRequest) -> String {
    match &state.config.public_base_url {
        Some(url) => url.trim_end_matches('/').to_string(),
        None => {
            let info = req.connection_info();
            format!("{}://{}", info.scheme(), info.host())
        }
    }
}

fn simple_get(summary: &str, operation_id: &str) -> Value {
    json!({
        "get": {
            "summary": summary,
            "operationId": operation_id,
            "responses": { "200": { "description": "OK" } }
        }
    })
}

fn json_post(summary: &str, operation_id: &str) -> Value {
    json!({
        "post": {
            "summary": summary,
            "operationId": operation_id,
            "requestBody": {
                "required": true,
                "content": { "application/json": { "schema": { "type": "object" } } }
            },
            "responses": {
                "200": { "description": "OK" },
                "400": { "description": "No data provided" }
            }
        }
    })
}

pub fn openapi_document(base_url: &str) -> Value {
    json!({
        "openapi": "3.1.0",
        "info": {
            "title": "TurfPro Bridge API",
            "version": VERSION,
            "description": "OpenAPI interface for TurfPro workflows via Cloud Run + Render"
        },
        "servers": [{ "url": base_url, "description": "Production" }],
        "paths": {
            "/health": simple_get("Health Check", "healthCheck"),
            "/status": simple_get("Status Check", "statusCheck"),
            "/test-basic": simple_get("Test Bridge", "testBasic"),
            "/test-render": {
                "get": {
                    "summary": "Test Render backend",
                    "operationId": "testRender",
                    "responses": {
                        "200": { "description": "OK" },
                        "500": { "description": "Error" }
                    }
                }
            },
            "/engine": {
                "post": {
                    "summary": "Execute Workflow (HMAC)",
                    "operationId": "executeEngine",
                    "security": [{ "hmacAuth": [] }],
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "type": "object" } } }
                    },
                    "responses": {
                        "200": { "description": "Success" },
                        "401": { "description": "Invalid HMAC" },
                        "502": { "description": "Backend Error" }
                    }
                }
            },
            "/ingest/min": json_post("Ingest Minimal", "ingestMin"),
            "/ingest/full": json_post("Ingest Full", "ingestFull"),
            "/data/collect": json_post("ARC1 Data Collect", "dataCollect"),
            "/fastturf/run": json_post("ARC2 FastTurf Run", "fastturfRun"),
            "/data/store": json_post("ARC3 Data Store", "dataStore"),
            "/analysis/psi": json_post("ARC4 PSI Analysis", "analysisPsi"),
            "/results/top3": {
                "get": {
                    "summary": "ARC5 Results Top3",
                    "operationId": "resultsTop3",
                    "parameters": [{
                        "name": "race_id",
                        "in": "query",
                        "required": false,
                        "schema": { "type": "string", "default": "latest" }
                    }],
                    "responses": { "200": { "description": "OK" } }
                }
            }
        },
        "components": {
            "securitySchemes": {
                "hmacAuth": { "type": "apiKey", "in": "header", "name": SIGNATURE_HEADER }
            }
        }
    })
}

pub async fn openapi(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().json(openapi_document(&public_base_url(&state, &req)))
}

pub async fn manifest(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let base_url = public_base_url(&state, &req);
    HttpResponse::Ok().json(json!({
        "schema_version": "v1",
        "name_for_human": "TurfPro Bridge Controller",
        "name_for_model": "turfpro_bridge",
        "description_for_human": "Control TurfPro infrastructure (Cloud Run, Render, GCP) through JSON workflows",
        "description_for_model": "API for TurfPro JSON workflows: deployment, monitoring, automatic correction. HMAC on /engine.",
        "auth": { "type": "none" },
        "api": { "type": "openapi", "url": format!("{}/openapi.json", base_url) }
    }))
}
