use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "turfpro-bridge")]
#[command(about = "HMAC bridge between the TurfPro API clients and the Render backend")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print startup diagnostics and run the HTTP server on $PORT
    Serve,

    /// Deploy the service to Cloud Run with gcloud
    Deploy {
        /// Path to the deploy TOML file
        #[arg(short, long, default_value = "deploy.toml")]
        config: PathBuf,

        /// Print the gcloud command without running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Probe a deployed service and pretty-print the JSON responses
    Smoke {
        /// Base URL of the deployed service
        #[arg(long, env = "SERVICE_URL")]
        url: String,

        /// Paths to probe (defaults to /health, /test-basic, /test-render)
        #[arg(long = "path")]
        paths: Vec<String>,

        /// Per-request timeout in seconds
        #[arg(long, default_value = "10")]
        timeout: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_smoke_with_paths() {
        let cli = Cli::try_parse_from([
            "turfpro-bridge",
            "smoke",
            "--url",
            "https://bridge.example.com",
            "--path",
            "/health",
            "--path",
            "/status",
        ])
        .unwrap();

        match cli.command {
            Command::Smoke { url, paths, timeout } => {
                assert_eq!(url, "https://bridge.example.com");
                assert_eq!(paths, vec!["/health", "/status"]);
                assert_eq!(timeout, 10);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_deploy_defaults() {
        let cli = Cli::try_parse_from(["turfpro-bridge", "--verbose", "deploy", "--dry-run"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Deploy { config, dry_run } => {
                assert_eq!(config, PathBuf::from("deploy.toml"));
                assert!(dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
