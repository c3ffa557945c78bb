use anyhow::Context;
use cf_cli::utils::error::ErrorSeverity;
use cf_cli::utils::{logger, validation::Validate};
use cf_cli::{
    default_commands, find_command, run_command, CliConfig, CloudControllerGateway,
    ConfigRequirementFactory, TerminalUi, TomlConfig,
};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.config_path() {
        Some(path) => TomlConfig::from_file(&path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => TomlConfig::default(),
    };

    logger::init_cli_logger(cli.verbose || config.trace || logger::trace_enabled_from_env());
    tracing::debug!("CLI args: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(1);
    }

    let config = Arc::new(config);
    let gateway = Arc::new(CloudControllerGateway::new(Arc::clone(&config))?);
    let factory = ConfigRequirementFactory::new(Arc::clone(&config));
    let commands = default_commands(Arc::clone(&config), gateway);

    let Some(command) = find_command(&commands, &cli.command) else {
        eprintln!("'{}' is not a registered command. See 'cf help'.", cli.command);
        std::process::exit(1);
    };

    // Failures are already reported to the terminal by `run_command`.
    if let Err(e) = run_command(command, &factory, &cli.args, &TerminalUi).await {
        tracing::error!(
            "{} failed: {} (Category: {:?}, Severity: {:?})",
            command.name(),
            e,
            e.category(),
            e.severity()
        );
        tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
