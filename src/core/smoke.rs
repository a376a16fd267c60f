use crate::utils::error::Result;
use reqwest::Client;
use std::fmt::Write as _;
use std::time::Duration;

pub const DEFAULT_PATHS: [&str; 3] = ["/health", "/test-basic", "/test-render"];

#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub url: String,
    pub status: Option<u16>,
    pub body: String,
    pub error: Option<String>,
}

impl ProbeResult {
    pub fn passed(&self) -> bool {
        self.error.is_none() && self.status.is_some_and(|s| (200..300).contains(&s))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SmokeReport {
    pub probes: Vec<ProbeResult>,
}

impl SmokeReport {
    pub fn all_passed(&self) -> bool {
        self.probes.iter().all(ProbeResult::passed)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for probe in &self.probes {
            let _ = writeln!(out, "=== GET {} ===", probe.url);
            match (&probe.status, &probe.error) {
                (_, Some(error)) => {
                    let _ = writeln!(out, "error: {}", error);
                }
                (Some(status), None) => {
                    let _ = writeln!(out, "HTTP {}", status);
                    let _ = writeln!(out, "{}", probe.body);
                }
                (None, None) => {}
            }
            out.push('\n');
        }
        out
    }
}

/// Sequential GETs against a deployed service; every path is probed even after a failure.
pub struct SmokeTester {
    base_url: String,
    paths: Vec<String>,
    client: Client,
}

impl SmokeTester {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            paths: DEFAULT_PATHS.iter().map(|p| p.to_string()).collect(),
            client,
        })
    }

    pub fn with_paths(mut self, paths: Vec<String>) -> Self {
        if !paths.is_empty() {
            self.paths = paths
                .into_iter()
                .map(|p| if p.starts_with('/') { p } else { format!("/{}", p) })
                .collect();
        }
        self
    }

    pub async fn run(&self) -> SmokeReport {
        let mut report = SmokeReport::default();
        for path in &self.paths {
            let url = format!("{}{}", self.base_url, path);
            report.probes.push(self.probe(url).await);
        }
        report
    }

    async fn probe(&self, url: String) -> ProbeResult {
        tracing::debug!("GET {}", url);
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("❌ {} unreachable: {}", url, e);
                return ProbeResult {
                    url,
                    status: None,
                    body: String::new(),
                    error: Some(e.to_string()),
                };
            }
        };

        let status = response.status().as_u16();
        let (body, error) = match response.text().await {
            Ok(text) => (pretty_json(&text), None),
            Err(e) => (String::new(), Some(e.to_string())),
        };

        ProbeResult {
            url,
            status: Some(status),
            body,
            error,
        }
    }
}

/// JSON 以縮排格式輸出，其他內容原樣保留
pub fn pretty_json(text: &str) -> String {
    serde_json::from_str::<serde_json::Value>(text)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| text.to_string())
}
