use crate::config::DeployConfig;
use crate::domain::model::{CommandOutput, DeployOutcome};
use crate::domain::ports::CommandRunner;
use crate::utils::error::{BridgeError, Result};
use crate::utils::validation::Validate;

pub const GCLOUD: &str = "gcloud";

/// Runs a program through `tokio::process`, capturing both output streams.
#[derive(Debug, Default, Clone)]
pub struct SystemCommandRunner;

#[async_trait::async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let output = tokio::process::Command::new(program)
            .args(args)
            .output()
            .await?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

pub struct Deployer<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> Deployer<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// 只呼叫一次 gcloud，失敗就停止，不重試
    pub async fn deploy(&self, config: &DeployConfig) -> Result<DeployOutcome> {
        config.validate()?;

        let args = config.gcloud_args();
        tracing::info!("🚀 Deploying service {} to {}", config.service.name, config.service.region);
        tracing::debug!("Running: {}", Self::render_command(config));

        let output = self.runner.run(GCLOUD, &args).await?;
        if !output.success() {
            tracing::error!("❌ gcloud exited with {:?}", output.code);
            return Err(BridgeError::CommandFailed {
                program: GCLOUD.to_string(),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            });
        }

        // gcloud 把進度寫在 stderr，URL 可能出現在任一邊
        let service_url = extract_service_url(&output.stderr)
            .or_else(|| extract_service_url(&output.stdout));
        match &service_url {
            Some(url) => tracing::info!("✅ Service deployed at {}", url),
            None => tracing::info!("✅ Service deployed"),
        }

        Ok(DeployOutcome {
            service: config.service.name.clone(),
            service_url,
        })
    }

    pub fn render_command(config: &DeployConfig) -> String {
        std::iter::once(GCLOUD.to_string())
            .chain(config.gcloud_args().into_iter().map(|arg| shell_quote(&arg)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn extract_service_url(text: &str) -> Option<String> {
    text.lines().find_map(|line| {
        line.trim()
            .strip_prefix("Service URL:")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
    })
}

fn shell_quote(arg: &str) -> String {
    let safe = arg
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_=./:@,".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
