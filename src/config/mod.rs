#[cfg(feature = "cli")]
pub mod cli;
pub mod deploy_config;
pub mod server;

#[cfg(feature = "cli")]
pub use cli::{Cli, Command};
pub use deploy_config::DeployConfig;
pub use server::ServerConfig;
