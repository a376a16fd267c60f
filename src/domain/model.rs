use serde::{Deserialize, Serialize};

/// Result of one `GET {backend}/status` round trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendProbe {
    pub status_code: u16,
    pub latency_ms: f64,
}

/// Status code and JSON body relayed from the backend `/engine` call.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineReply {
    pub status_code: u16,
    pub body: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeployOutcome {
    pub service: String,
    pub service_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub position: u8,
    pub horse: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Placing {
    pub position: u8,
    pub horse: String,
    pub number: u8,
    pub jockey: String,
    pub odds: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insights {
    pub trend: String,
    pub risk_level: String,
    pub confidence: f64,
    pub key_factors: Vec<String>,
}
