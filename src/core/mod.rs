pub mod backend;
pub mod deploy;
pub mod signature;
pub mod smoke;
pub mod startup;

pub use crate::domain::model::{BackendProbe, CommandOutput, DeployOutcome, EngineReply};
pub use crate::domain::ports::{Backend, CommandRunner};
pub use crate::utils::error::Result;
