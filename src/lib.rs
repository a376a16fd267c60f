pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub const SERVICE_NAME: &str = "bridge-api-light";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "cli")]
pub use crate::config::Cli;

pub use crate::app::{configure, run_server, AppState};
pub use crate::config::{DeployConfig, ServerConfig};
pub use crate::core::{deploy::Deployer, smoke::SmokeTester};
pub use crate::utils::error::{BridgeError, Result};
