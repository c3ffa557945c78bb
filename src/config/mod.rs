pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

/// Process arguments. The command's own positional arguments are passed
/// through untouched so each command validates its own arity.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "cf")]
#[command(about = "Command line client for the cloud controller API")]
pub struct CliConfig {
    #[arg(long, help = "Path to the config file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(help = "Command to run, e.g. create-service")]
    pub command: String,

    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(TomlConfig::default_path)
    }
}
