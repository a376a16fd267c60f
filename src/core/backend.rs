use crate::domain::model::{BackendProbe, EngineReply};
use crate::domain::ports::Backend;
use crate::utils::error::{BridgeError, Result};
use reqwest::Client;
use std::time::{Duration, Instant};

pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn status(&self) -> Result<BackendProbe> {
        let url = self.url("/status");
        tracing::debug!("Probing backend: {}", url);

        let start = Instant::now();
        let response = self.client.get(&url).send().await?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        Ok(BackendProbe {
            status_code: response.status().as_u16(),
            latency_ms: (elapsed_ms * 100.0).round() / 100.0,
        })
    }

    async fn forward_engine(&self, payload: serde_json::Value) -> Result<EngineReply> {
        let url = self.url("/engine");
        tracing::debug!("Forwarding engine request to: {}", url);

        let response = self.client.post(&url).json(&payload).send().await?;
        let status_code = response.status().as_u16();
        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| BridgeError::BackendError {
                message: format!("backend returned non-JSON body ({}): {}", status_code, e),
            })?;

        Ok(EngineReply { status_code, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_status_reports_code_and_latency() {
        let server = MockServer::start_async().await;
        let status_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/status");
                then.status(200).json_body(serde_json::json!({"status": "running"}));
            })
            .await;

        let backend = HttpBackend::new(server.base_url(), Duration::from_secs(3)).unwrap();
        let probe = backend.status().await.unwrap();

        status_mock.assert_async().await;
        assert_eq!(probe.status_code, 200);
        assert!(probe.latency_ms >= 0.0);
    }

    #[tokio::test]
    async fn test_status_passes_through_error_codes() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/status");
                then.status(503);
            })
            .await;

        let backend = HttpBackend::new(server.base_url(), Duration::from_secs(3)).unwrap();
        assert_eq!(backend.status().await.unwrap().status_code, 503);
    }

    #[tokio::test]
    async fn test_forward_engine_relays_status_and_body() {
        let server = MockServer::start_async().await;
        let engine_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/engine")
                    .header("content-type", "application/json")
                    .json_body(serde_json::json!({"workflow": "deploy"}));
                then.status(202).json_body(serde_json::json!({"accepted": true}));
            })
            .await;

        let backend = HttpBackend::new(format!("{}/", server.base_url()), Duration::from_secs(3)).unwrap();
        let reply = backend
            .forward_engine(serde_json::json!({"workflow": "deploy"}))
            .await
            .unwrap();

        engine_mock.assert_async().await;
        assert_eq!(reply.status_code, 202);
        assert_eq!(reply.body, serde_json::json!({"accepted": true}));
    }

    #[tokio::test]
    async fn test_forward_engine_non_json_is_backend_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/engine");
                then.status(500).body("<html>oops</html>");
            })
            .await;

        let backend = HttpBackend::new(server.base_url(), Duration::from_secs(3)).unwrap();
        let err = backend.forward_engine(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, BridgeError::BackendError { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_api_error() {
        // 保留埠，不會有服務在聽
        let backend = HttpBackend::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let err = backend.status().await.unwrap_err();
        assert!(matches!(err, BridgeError::ApiError(_)));
    }
}
