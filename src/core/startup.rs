use crate::config::ServerConfig;
use serde::Serialize;

/// Debug information emitted once before the server binds.
#[derive(Debug, Clone, Serialize)]
pub struct StartupReport {
    pub service: &'static str,
    pub version: &'static str,
    pub port: u16,
    pub bind_address: String,
    pub environment: String,
    pub backend_url: String,
    pub hmac_configured: bool,
    pub working_directory: Option<String>,
    pub process_id: u32,
}

impl StartupReport {
    pub fn collect(config: &ServerConfig) -> Self {
        Self {
            service: crate::SERVICE_NAME,
            version: env!("CARGO_PKG_VERSION"),
            port: config.port,
            bind_address: config.bind_address(),
            environment: config.environment.clone(),
            backend_url: config.backend_url.clone(),
            hmac_configured: config.hmac_configured(),
            working_directory: std::env::current_dir()
                .ok()
                .map(|dir| dir.display().to_string()),
            process_id: std::process::id(),
        }
    }

    pub fn log(&self) {
        tracing::info!(
            service = self.service,
            version = self.version,
            port = self.port,
            environment = %self.environment,
            backend = %self.backend_url,
            hmac_configured = self.hmac_configured,
            pid = self.process_id,
            cwd = self.working_directory.as_deref().unwrap_or("<unknown>"),
            "Starting bridge API on {}",
            self.bind_address
        );
        if !self.hmac_configured {
            tracing::warn!("HMAC_SECRET is not set; /engine will reject every request");
        }
    }
}
