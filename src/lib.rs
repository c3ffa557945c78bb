pub mod api;
pub mod commands;
pub mod config;
pub mod core;
pub mod domain;
pub mod requirements;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use commands::{default_commands, find_command, run_command, Command, CommandOutcome};
pub use config::TomlConfig;
pub use crate::core::gateway::CloudControllerGateway;
pub use requirements::ConfigRequirementFactory;
pub use utils::error::{CfError, Result};
pub use utils::terminal::TerminalUi;
