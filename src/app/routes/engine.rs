use super::parse_json_body;
use crate::app::AppState;
use crate::utils::error::BridgeError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};

pub const SIGNATURE_HEADER: &str = "X-HMAC-Signature";

/// Verifies the signature over the raw body, then relays the call to the backend.
pub async fn engine(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, BridgeError> {
    let signature = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if !state.verifier.verify(&body, signature) {
        tracing::warn!("Invalid HMAC signature on /engine");
        return Err(BridgeError::InvalidSignature);
    }

    let payload = parse_json_body(&body)?;
    let reply = state.backend.forward_engine(payload).await.map_err(|e| {
        tracing::error!("Backend error on /engine: {}", e);
        e
    })?;

    tracing::info!("Engine call relayed - backend status: {}", reply.status_code);
    let status = StatusCode::from_u16(reply.status_code).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok(HttpResponse::build(status).json(reply.body))
}
