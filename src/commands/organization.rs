use super::{check_arg_count, Command, CommandOutcome};
use crate::domain::ports::{ConfigReader, OrganizationRepository, Ui};
use crate::requirements::{Requirement, RequirementFactory};
use crate::utils::error::{CfError, Result};
use async_trait::async_trait;
use std::sync::Arc;

pub struct ListOrganizations<C, R> {
    config: Arc<C>,
    org_repo: R,
}

impl<C: ConfigReader, R: OrganizationRepository> ListOrganizations<C, R> {
    pub fn new(config: Arc<C>, org_repo: R) -> Self {
        Self { config, org_repo }
    }
}

#[async_trait]
impl<C: ConfigReader, R: OrganizationRepository> Command for ListOrganizations<C, R> {
    fn name(&self) -> &'static str {
        "orgs"
    }

    fn usage(&self) -> &'static str {
        "cf orgs"
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
        ui.say(&format!("Getting orgs as {}...", self.config.username()));

        let orgs = self.org_repo.find_all().await?;
        if orgs.is_empty() {
            ui.say("No orgs found");
        }
        for org in &orgs {
            ui.say(&org.name);
        }
        Ok(CommandOutcome::Succeeded)
    }
}

/// `org NAME`: resolves one org by name, ignoring case.
pub struct ShowOrganization<R> {
    org_repo: R,
}

impl<R: OrganizationRepository> ShowOrganization<R> {
    pub fn new(org_repo: R) -> Self {
        Self { org_repo }
    }
}

#[async_trait]
impl<R: OrganizationRepository> Command for ShowOrganization<R> {
    fn name(&self) -> &'static str {
        "org"
    }

    fn usage(&self) -> &'static str {
        "cf org ORG"
    }

    fn requirements(
        &self,
        factory: &dyn RequirementFactory,
        args: &[String],
    ) -> Result<Vec<Box<dyn Requirement>>> {
        check_arg_count(self.name(), args, 1)?;
        Ok(vec![factory.new_login_requirement()])
    }

    async fn run(&self, args: &[String], ui: &dyn Ui) -> Result<CommandOutcome> {
        let [name] = args else {
            return Err(CfError::usage(self.name(), "requires 1 argument(s)"));
        };

        ui.say(&format!("Getting info for org {}...", name));
        let org = self.org_repo.find_by_name(name).await?;
        ui.say(&format!("{}:", org.name));
        ui.say(&format!("  guid: {}", org.guid));
        Ok(CommandOutcome::Succeeded)
    }
}
