use super::{parse_ingest_payload, records_len, timestamp};
use crate::utils::error::BridgeError;
use actix_web::{web, HttpResponse};
use serde_json::{json, Value};

pub async fn ingest_min(body: web::Bytes) -> Result<HttpResponse, BridgeError> {
    let payload = parse_ingest_payload(&body)?;
    let records = records_len(&payload)?;
    tracing::info!("Ingest minimal - {} records", records);

    Ok(HttpResponse::Ok().json(json!({
        "status": "ingested",
        "mode": "minimal",
        "records": records,
        "timestamp": timestamp(),
    })))
}

pub async fn ingest_full(body: web::Bytes) -> Result<HttpResponse, BridgeError> {
    let payload = parse_ingest_payload(&body)?;
    let records = records_len(&payload)?;
    let metadata = payload
        .get("metadata")
        .cloned()
        .unwrap_or_else(|| Value::Object(Default::default()));
    tracing::info!("Ingest full - {} records", records);

    Ok(HttpResponse::Ok().json(json!({
        "status": "ingested",
        "mode": "full",
        "records": records,
        "metadata": metadata,
        "timestamp": timestamp(),
    })))
}
