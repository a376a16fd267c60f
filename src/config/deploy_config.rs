use crate::utils::error::{BridgeError, Result};
use crate::utils::validation::{
    validate_memory_quantity, validate_no_unresolved_vars, validate_non_empty_string,
    validate_range, validate_required_field, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    pub service: ServiceConfig,
    #[serde(default)]
    pub resources: ResourcesConfig,
    #[serde(default)]
    pub access: AccessConfig,
    #[serde(default = "default_secrets")]
    pub secrets: BTreeMap<String, String>,
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub project: String,
    #[serde(default = "default_region")]
    pub region: String,
    pub image: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesConfig {
    #[serde(default = "default_memory")]
    pub memory: String,
    pub cpu: Option<String>,
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u32,
    #[serde(default)]
    pub min_instances: u32,
    #[serde(default = "default_max_instances")]
    pub max_instances: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessConfig {
    pub service_account: Option<String>,
    #[serde(default)]
    pub allow_unauthenticated: bool,
}

fn default_region() -> String {
    "europe-west1".to_string()
}

fn default_memory() -> String {
    "512Mi".to_string()
}

fn default_concurrency() -> u32 {
    80
}

fn default_timeout_seconds() -> u32 {
    300
}

fn default_max_instances() -> u32 {
    10
}

fn default_secrets() -> BTreeMap<String, String> {
    BTreeMap::from([("HMAC_SECRET".to_string(), "hmac-secret:latest".to_string())])
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            memory: default_memory(),
            cpu: None,
            concurrency: default_concurrency(),
            timeout_seconds: default_timeout_seconds(),
            min_instances: 0,
            max_instances: default_max_instances(),
        }
    }
}

impl DeployConfig {
    /// 從 TOML 檔案載入部署配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BridgeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析部署配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BridgeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GCP_PROJECT})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BridgeError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 產生 `gcloud` 的參數列表
    pub fn gcloud_args(&self) -> Vec<String> {
        let mut args = vec![
            "run".to_string(),
            "deploy".to_string(),
            self.service.name.clone(),
        ];

        if let Some(image) = &self.service.image {
            args.push(format!("--image={}", image));
        } else {
            let source = self.service.source.as_deref().unwrap_or(".");
            args.push(format!("--source={}", source));
        }

        args.push(format!("--project={}", self.service.project));
        args.push(format!("--region={}", self.service.region));
        args.push("--platform=managed".to_string());
        args.push(format!("--memory={}", self.resources.memory));
        if let Some(cpu) = &self.resources.cpu {
            args.push(format!("--cpu={}", cpu));
        }
        args.push(format!("--concurrency={}", self.resources.concurrency));
        args.push(format!("--timeout={}", self.resources.timeout_seconds));
        args.push(format!("--min-instances={}", self.resources.min_instances));
        args.push(format!("--max-instances={}", self.resources.max_instances));

        if let Some(account) = &self.access.service_account {
            args.push(format!("--service-account={}", account));
        }
        args.push(if self.access.allow_unauthenticated {
            "--allow-unauthenticated".to_string()
        } else {
            "--no-allow-unauthenticated".to_string()
        });

        if !self.secrets.is_empty() {
            args.push(format!("--set-secrets={}", join_pairs(&self.secrets)));
        }
        if !self.environment.is_empty() {
            args.push(format!("--set-env-vars={}", join_pairs(&self.environment)));
        }

        args
    }

    fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("service.name", &self.service.name)?;
        validate_non_empty_string("service.project", &self.service.project)?;
        validate_non_empty_string("service.region", &self.service.region)?;
        let account = validate_required_field("access.service_account", &self.access.service_account)?;

        for (field, value) in [
            ("service.name", self.service.name.as_str()),
            ("service.project", self.service.project.as_str()),
            ("service.region", self.service.region.as_str()),
            ("access.service_account", account.as_str()),
        ] {
            validate_no_unresolved_vars(field, value)?;
        }
        for (field, value) in [
            ("service.image", &self.service.image),
            ("service.source", &self.service.source),
            ("resources.cpu", &self.resources.cpu),
        ] {
            if let Some(value) = value {
                validate_no_unresolved_vars(field, value)?;
            }
        }
        for (section, map) in [("environment", &self.environment), ("secrets", &self.secrets)] {
            for (key, value) in map {
                validate_no_unresolved_vars(&format!("{}.{} (key)", section, key), key)?;
                validate_no_unresolved_vars(&format!("{}.{}", section, key), value)?;
            }
        }

        validate_memory_quantity("resources.memory", &self.resources.memory)?;
        validate_range("resources.concurrency", self.resources.concurrency, 1, 1000)?;
        validate_range("resources.timeout_seconds", self.resources.timeout_seconds, 1, 3600)?;
        if self.resources.min_instances > self.resources.max_instances {
            return Err(BridgeError::InvalidConfigValueError {
                field: "resources.min_instances".to_string(),
                value: self.resources.min_instances.to_string(),
                reason: format!(
                    "Must not exceed max_instances ({})",
                    self.resources.max_instances
                ),
            });
        }

        for (key, reference) in &self.secrets {
            match reference.split_once(':') {
                Some((name, version)) if !name.is_empty() && !version.is_empty() => {}
                _ => {
                    return Err(BridgeError::InvalidConfigValueError {
                        field: format!("secrets.{}", key),
                        value: reference.clone(),
                        reason: "Secret reference must look like name:version".to_string(),
                    })
                }
            }
        }

        Ok(())
    }
}

impl Validate for DeployConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

fn join_pairs(pairs: &BTreeMap<String, String>) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(",")
}
