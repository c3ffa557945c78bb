pub mod organization;
pub mod service;
pub mod service_auth_token;

#[cfg(test)]
pub(crate) mod test_support;

use crate::api::{
    CloudControllerOrganizationRepository, CloudControllerServiceAuthTokenRepository,
    CloudControllerServiceRepository,
};
use crate::domain::ports::{ConfigReader, Gateway, Ui};
use crate::requirements::{check_all, Requirement, RequirementFactory};
use crate::utils::error::{CfError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// How a command that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Succeeded,
    /// Nothing to do, e.g. creating something that already exists.
    SucceededWithWarning(String),
}

#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;
    fn usage(&self) -> &'static str;

    /// Validates the argument shape, then lists the preconditions in the
    /// order they must be checked.
    fn requirements(
        &self,
        factory: &dyn RequirementFactory,
        args: &[String],
    ) -> Result<Vec<Box<dyn Requirement>>>;

    async fn run(&self, args: &[String], ui: &dyn Ui) -> Result<CommandOutcome>;
}

pub fn check_arg_count(command: &str, args: &[String], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(CfError::usage(
            command,
            format!("requires {} argument(s), got {}", expected, args.len()),
        ));
    }
    Ok(())
}

/// Argument validation, then requirements, then the action. The outcome
/// is reported to `ui` exactly once.
pub async fn run_command(
    command: &dyn Command,
    factory: &dyn RequirementFactory,
    args: &[String],
    ui: &dyn Ui,
) -> Result<CommandOutcome> {
    let requirements = match command.requirements(factory, args) {
        Ok(requirements) => requirements,
        Err(err) => {
            match &err {
                CfError::Usage { .. } => ui.failed_with_usage(command.name(), command.usage()),
                other => ui.failed(&other.to_string()),
            }
            return Err(err);
        }
    };

    if let Err(err) = check_all(&requirements) {
        tracing::debug!("{}: requirement failed: {}", command.name(), err);
        ui.failed(&err.to_string());
        return Err(err);
    }

    tracing::info!("Running {}", command.name());
    match command.run(args, ui).await {
        Ok(CommandOutcome::Succeeded) => {
            ui.ok();
            Ok(CommandOutcome::Succeeded)
        }
        Ok(CommandOutcome::SucceededWithWarning(message)) => {
            ui.ok();
            ui.warn(&message);
            Ok(CommandOutcome::SucceededWithWarning(message))
        }
        Err(err) => {
            tracing::debug!("{} failed: {:?}", command.name(), err);
            ui.failed(&err.to_string());
            Err(err)
        }
    }
}

/// Every command the binary knows, wired to the cloud controller.
pub fn default_commands<G, C>(config: Arc<C>, gateway: Arc<G>) -> Vec<Box<dyn Command>>
where
    G: Gateway + 'static,
    C: ConfigReader + 'static,
{
    let orgs = || CloudControllerOrganizationRepository::new(Arc::clone(&config), Arc::clone(&gateway));
    let tokens =
        || CloudControllerServiceAuthTokenRepository::new(Arc::clone(&config), Arc::clone(&gateway));
    let services = || CloudControllerServiceRepository::new(Arc::clone(&config), Arc::clone(&gateway));

    vec![
        Box::new(organization::ListOrganizations::new(Arc::clone(&config), orgs())),
        Box::new(organization::ShowOrganization::new(orgs())),
        Box::new(service::CreateService::new(Arc::clone(&config), services())),
        Box::new(service::DeleteService::new(Arc::clone(&config), services())),
        Box::new(service_auth_token::ListServiceAuthTokens::new(tokens())),
        Box::new(service_auth_token::CreateServiceAuthToken::new(tokens())),
        Box::new(service_auth_token::UpdateServiceAuthToken::new(tokens())),
        Box::new(service_auth_token::DeleteServiceAuthToken::new(tokens())),
    ]
}

pub fn find_command<'a>(commands: &'a [Box<dyn Command>], name: &str) -> Option<&'a dyn Command> {
    commands
        .iter()
        .find(|command| command.name() == name)
        .map(|command| command.as_ref())
}
