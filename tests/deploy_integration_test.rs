use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use turfpro_bridge::core::{CommandOutput, CommandRunner};
use turfpro_bridge::utils::error::ErrorSeverity;
use turfpro_bridge::{BridgeError, DeployConfig, Deployer, Result};

#[derive(Clone, Default)]
struct FakeGcloud {
    invocations: Arc<Mutex<Vec<Vec<String>>>>,
    fail: bool,
}

#[async_trait::async_trait]
impl CommandRunner for FakeGcloud {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        assert_eq!(program, "gcloud");
        self.invocations.lock().unwrap().push(args.to_vec());

        if self.fail {
            return Ok(CommandOutput {
                code: Some(1),
                stdout: String::new(),
                stderr: "ERROR: (gcloud.run.deploy) Secret hmac-secret not found\n".to_string(),
            });
        }
        Ok(CommandOutput {
            code: Some(0),
            stdout: String::new(),
            stderr: format!(
                "Deploying container to Cloud Run service [{}]\nDone.\nService URL: https://{}-49503293887.europe-west1.run.app\n",
                args[2], args[2]
            ),
        })
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const FULL_CONFIG: &str = r#"
[service]
name = "bridge-api"
project = "turfpro-prod"
region = "europe-west1"
source = "."

[resources]
memory = "1Gi"
concurrency = 40
timeout_seconds = 60
min_instances = 1
max_instances = 3

[access]
service_account = "bridge@turfpro-prod.iam.gserviceaccount.com"
allow_unauthenticated = true

[secrets]
HMAC_SECRET = "hmac-secret:latest"

[environment]
RENDER_BACKEND_URL = "https://turfpro-secured-v2-1.onrender.com"
"#;

#[tokio::test]
async fn test_deploy_from_file_with_fake_gcloud() {
    let file = write_config(FULL_CONFIG);
    let config = DeployConfig::from_file(file.path()).unwrap();

    let gcloud = FakeGcloud::default();
    let outcome = Deployer::new(gcloud.clone()).deploy(&config).await.unwrap();

    assert_eq!(
        outcome.service_url.as_deref(),
        Some("https://bridge-api-49503293887.europe-west1.run.app")
    );

    let invocations = gcloud.invocations.lock().unwrap();
    assert_eq!(invocations.len(), 1);
    let args = &invocations[0];
    for expected in [
        "--source=.",
        "--memory=1Gi",
        "--concurrency=40",
        "--timeout=60",
        "--min-instances=1",
        "--max-instances=3",
        "--set-secrets=HMAC_SECRET=hmac-secret:latest",
        "--set-env-vars=RENDER_BACKEND_URL=https://turfpro-secured-v2-1.onrender.com",
    ] {
        assert!(args.iter().any(|a| a == expected), "missing {expected}");
    }
}

#[tokio::test]
async fn test_failed_deploy_stops_with_high_severity() {
    let config = DeployConfig::from_toml_str(FULL_CONFIG).unwrap();
    let gcloud = FakeGcloud {
        fail: true,
        ..FakeGcloud::default()
    };

    let err = Deployer::new(gcloud.clone()).deploy(&config).await.unwrap_err();

    assert!(matches!(err, BridgeError::CommandFailed { .. }));
    assert_eq!(err.severity(), ErrorSeverity::High);
    assert_eq!(err.exit_code(), 1);
    assert_eq!(gcloud.invocations.lock().unwrap().len(), 1);
}

#[test]
fn test_dry_run_rendering_matches_args() {
    let config = DeployConfig::from_toml_str(FULL_CONFIG).unwrap();
    let rendered = Deployer::<FakeGcloud>::render_command(&config);

    assert_eq!(
        rendered,
        format!("gcloud {}", config.gcloud_args().join(" "))
    );
}
