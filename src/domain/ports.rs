use crate::domain::model::{BackendProbe, CommandOutput, EngineReply};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The remote service the bridge forwards to.
#[async_trait]
pub trait Backend: Send + Sync {
    fn base_url(&self) -> &str;
    async fn status(&self) -> Result<BackendProbe>;
    async fn forward_engine(&self, payload: serde_json::Value) -> Result<EngineReply>;
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput>;
}
