use super::{check_arg_count, Command, CommandOutcome};
use crate::domain::model::ServiceAuthTokenFields;
use crate::domain::ports::{ServiceAuthTokenRepository, Ui};
use crate::requirements::{Requirement, RequirementFactory};
use crate::utils::error::{CfError, Result};
use async_trait::async_trait;

pub struct ListServiceAuthTokens<R> {
    auth_token_repo: R,
}

impl<R: ServiceAuthTokenRepository> ListServiceAuthTokens<R> {
    pub fn new(auth_token_repo: R) -> Self {
        Self { auth_token_repo }
    }
}

#[async_trait]
impl<R: ServiceAuthTokenRepository> Command for ListServiceAuthTokens<R> {
    fn name(&self) -> &'static str {
        "service-auth-tokens"
    }

    fn usage(&self) -> &'static str {
        "cf service-auth-tokens"
    }

    fn requirements(
        &self,
        factory: &dyn RequirementFactory,
        args: &[String],
    ) -> Result<Vec<Box<dyn Requirement>>> {
        check_arg_count(self.name(), args, 0)?;
        Ok(vec![factory.new_login_requirement()])
    }

    async fn run(&self, _args: &[String], ui: &dyn Ui) -> Result<CommandOutcome> {
        ui.say("Getting service auth tokens...");

        let tokens = self.auth_token_repo.find_all().await?;
        if tokens.is_empty() {
            ui.say("No service auth tokens found");
        } else {
            ui.say("label\tprovider");
        }
        for token in &tokens {
            ui.say(&format!("{}\t{}", token.label, token.provider));
        }
        Ok(CommandOutcome::Succeeded)
    }
}

/// `create-service-auth-token LABEL PROVIDER TOKEN`. A token that already
/// exists for the label and provider is left alone with a warning.
pub struct CreateServiceAuthToken<R> {
    auth_token_repo: R,
}

impl<R: ServiceAuthTokenRepository> CreateServiceAuthToken<R> {
    pub fn new(auth_token_repo: R) -> Self {
        Self { auth_token_repo }
    }
}

#[async_trait]
impl<R: ServiceAuthTokenRepository> Command for CreateServiceAuthToken<R> {
    fn name(&self) -> &'static str {
        "create-service-auth-token"
    }

    fn usage(&self) -> &'static str {
        "cf create-service-auth-token LABEL PROVIDER TOKEN"
    }

    fn requirements(
        &self,
        factory: &dyn RequirementFactory,
        args: &[String],
    ) -> Result<Vec<Box<dyn Requirement>>> {
        check_arg_count(self.name(), args, 3)?;
        Ok(vec![factory.new_login_requirement()])
    }

    async fn run(&self, args: &[String], ui: &dyn Ui) -> Result<CommandOutcome> {
        let [label, provider, token] = args else {
            return Err(CfError::usage(self.name(), "requires 3 argument(s)"));
        };

        ui.say("Creating service auth token...");
        let auth_token = ServiceAuthTokenFields {
            guid: String::new(),
            label: label.clone(),
            provider: provider.clone(),
            token: token.clone(),
        };

        match self.auth_token_repo.create(&auth_token).await {
            Ok(()) => Ok(CommandOutcome::Succeeded),
            Err(err @ CfError::AlreadyExists { .. }) => {
                tracing::warn!("{}", err);
                Ok(CommandOutcome::SucceededWithWarning(err.to_string()))
            }
            Err(err) => Err(err),
        }
    }
}

/// `update-service-auth-token LABEL PROVIDER TOKEN`: replaces the token
/// material only.
pub struct UpdateServiceAuthToken<R> {
    auth_token_repo: R,
}

impl<R: ServiceAuthTokenRepository> UpdateServiceAuthToken<R> {
    pub fn new(auth_token_repo: R) -> Self {
        Self { auth_token_repo }
    }
}

#[async_trait]
impl<R: ServiceAuthTokenRepository> Command for UpdateServiceAuthToken<R> {
    fn name(&self) -> &'static str {
        "update-service-auth-token"
    }

    fn usage(&self) -> &'static str {
        "cf update-service-auth-token LABEL PROVIDER TOKEN"
    }

    fn requirements(
        &self,
        factory: &dyn RequirementFactory,
        args: &[String],
    ) -> Result<Vec<Box<dyn Requirement>>> {
        check_arg_count(self.name(), args, 3)?;
        Ok(vec![factory.new_login_requirement()])
    }

    async fn run(&self, args: &[String], ui: &dyn Ui) -> Result<CommandOutcome> {
        let [label, provider, token] = args else {
            return Err(CfError::usage(self.name(), "requires 3 argument(s)"));
        };

        ui.say("Updating service auth token...");
        let mut auth_token = self
            .auth_token_repo
            .find_by_label_and_provider(label, provider)
            .await?;
        auth_token.token = token.clone();

        self.auth_token_repo.update(&auth_token).await?;
        Ok(CommandOutcome::Succeeded)
    }
}

/// `delete-service-auth-token LABEL PROVIDER`.
pub struct DeleteServiceAuthToken<R> {
    auth_token_repo: R,
}

impl<R: ServiceAuthTokenRepository> DeleteServiceAuthToken<R> {
    pub fn new(auth_token_repo: R) -> Self {
        Self { auth_token_repo }
    }
}

#[async_trait]
impl<R: ServiceAuthTokenRepository> Command for DeleteServiceAuthToken<R> {
    fn name(&self) -> &'static str {
        "delete-service-auth-token"
    }

    fn usage(&self) -> &'static str {
        "cf delete-service-auth-token LABEL PROVIDER"
    }

    fn requirements(
        &self,
        factory: &dyn RequirementFactory,
        args: &[String],
    ) -> Result<Vec<Box<dyn Requirement>>> {
        check_arg_count(self.name(), args, 2)?;
        Ok(vec![factory.new_login_requirement()])
    }

    async fn run(&self, args: &[String], ui: &dyn Ui) -> Result<CommandOutcome> {
        let [label, provider] = args else {
            return Err(CfError::usage(self.name(), "requires 2 argument(s)"));
        };

        ui.say("Deleting service auth token...");
        let auth_token = match self
            .auth_token_repo
            .find_by_label_and_provider(label, provider)
            .await
        {
            Ok(auth_token) => auth_token,
            Err(CfError::NotFound { .. }) => {
                return Ok(CommandOutcome::SucceededWithWarning(format!(
                    "Service Auth Token {} {} does not exist.",
                    label, provider
                )));
            }
            Err(err) => return Err(err),
        };

        self.auth_token_repo.delete(&auth_token).await?;
        Ok(CommandOutcome::Succeeded)
    }
}
