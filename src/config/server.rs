use crate::utils::error::{BridgeError, Result};
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_BACKEND_URL: &str = "https://turfpro-secured-v2-1.onrender.com";
pub const DEFAULT_BACKEND_TIMEOUT_SECONDS: u64 = 3;
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Runtime settings for the bridge service, read from the process environment.
#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub environment: String,
    pub backend_url: String,
    pub hmac_secret: Vec<u8>,
    pub backend_timeout_seconds: u64,
    pub max_body_bytes: usize,
    pub public_base_url: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 由任意查詢函式建立配置（測試時不必動到真實環境變數）
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let backend_timeout_seconds = parse_or(
            "BACKEND_TIMEOUT_SECONDS",
            lookup("BACKEND_TIMEOUT_SECONDS"),
            DEFAULT_BACKEND_TIMEOUT_SECONDS,
        )?;
        let max_body_bytes =
            parse_or("MAX_BODY_BYTES", lookup("MAX_BODY_BYTES"), DEFAULT_MAX_BODY_BYTES)?;

        Ok(Self {
            port,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            backend_url: lookup("RENDER_BACKEND_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            hmac_secret: lookup("HMAC_SECRET").unwrap_or_default().into_bytes(),
            backend_timeout_seconds,
            max_body_bytes,
            public_base_url: lookup("PUBLIC_BASE_URL").filter(|url| !url.is_empty()),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn hmac_configured(&self) -> bool {
        !self.hmac_secret.is_empty()
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_seconds)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            hmac_secret: Vec::new(),
            backend_timeout_seconds: DEFAULT_BACKEND_TIMEOUT_SECONDS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            public_base_url: None,
        }
    }
}

// 密鑰不可出現在日誌中
impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("backend_url", &self.backend_url)
            .field("hmac_secret", &if self.hmac_configured() { "<redacted>" } else { "<unset>" })
            .field("backend_timeout_seconds", &self.backend_timeout_seconds)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("public_base_url", &self.public_base_url)
            .finish()
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_url("RENDER_BACKEND_URL", &self.backend_url)?;
        validate_positive_number("PORT", self.port as usize, 1)?;
        validate_range("BACKEND_TIMEOUT_SECONDS", self.backend_timeout_seconds, 1, 60)?;
        validate_positive_number("MAX_BODY_BYTES", self.max_body_bytes, 1)?;
        if let Some(public) = &self.public_base_url {
            validate_url("PUBLIC_BASE_URL", public)?;
        }
        Ok(())
    }
}

fn parse_or<T>(field: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e: T::Err| BridgeError::InvalidConfigValueError {
                field: field.to_string(),
                value: value.clone(),
                reason: e.to_string(),
            }),
    }
}
