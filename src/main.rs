use clap::Parser;
use std::time::Duration;
use turfpro_bridge::config::Command;
use turfpro_bridge::core::deploy::SystemCommandRunner;
use turfpro_bridge::core::startup::StartupReport;
use turfpro_bridge::utils::{logger, validation::Validate};
use turfpro_bridge::{
    run_server, BridgeError, Cli, DeployConfig, Deployer, ServerConfig, SmokeTester,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 伺服器輸出 JSON 日誌，其他指令用精簡格式
    match cli.command {
        Command::Serve => logger::init_server_logger(),
        _ => logger::init_cli_logger(cli.verbose),
    }

    let result = match cli.command {
        Command::Serve => serve().await,
        Command::Deploy { config, dry_run } => deploy(&config, dry_run).await,
        Command::Smoke {
            url,
            paths,
            timeout,
        } => smoke(url, paths, timeout).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn serve() -> Result<(), BridgeError> {
    let config = ServerConfig::from_env()?;
    config.validate()?;

    StartupReport::collect(&config).log();
    tracing::debug!("Server config: {:?}", config);

    run_server(config).await
}

async fn deploy(path: &std::path::Path, dry_run: bool) -> Result<(), BridgeError> {
    tracing::info!("📁 Loading deploy configuration from: {}", path.display());
    let config = DeployConfig::from_file(path)?;
    config.validate()?;

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - gcloud will not be called");
        println!("{}", Deployer::<SystemCommandRunner>::render_command(&config));
        return Ok(());
    }

    let outcome = Deployer::new(SystemCommandRunner).deploy(&config).await?;
    println!("✅ Deployed {}", outcome.service);
    if let Some(url) = outcome.service_url {
        println!("🌐 {}", url);
    }
    Ok(())
}

async fn smoke(url: String, paths: Vec<String>, timeout: u64) -> Result<(), BridgeError> {
    turfpro_bridge::utils::validation::validate_url("--url", &url)?;

    let tester = SmokeTester::new(url, Duration::from_secs(timeout))?.with_paths(paths);
    let report = tester.run().await;
    print!("{}", report.render());

    if !report.all_passed() {
        let failed = report.probes.iter().filter(|p| !p.passed()).count();
        eprintln!("❌ {} of {} probes failed", failed, report.probes.len());
        std::process::exit(1);
    }
    println!("✅ All {} probes passed", report.probes.len());
    Ok(())
}
