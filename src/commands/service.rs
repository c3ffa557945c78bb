use super::{check_arg_count, Command, CommandOutcome};
use crate::domain::model::{ServiceOffering, ServicePlanFields};
use crate::domain::ports::{ConfigReader, ServiceRepository, Ui};
use crate::requirements::{Requirement, RequirementFactory};
use crate::utils::error::{CfError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Offerings whose label is exactly `label`, in listing order.
pub fn find_offerings(offerings: &[ServiceOffering], label: &str) -> Result<Vec<ServiceOffering>> {
    let matching: Vec<ServiceOffering> = offerings
        .iter()
        .filter(|offering| offering.label == label)
        .cloned()
        .collect();

    if matching.is_empty() {
        return Err(CfError::not_found("Service offering", label));
    }
    Ok(matching)
}

/// First plan named exactly `name`, searching offerings in order.
pub fn find_plan_from_offerings(
    offerings: &[ServiceOffering],
    name: &str,
) -> Result<ServicePlanFields> {
    offerings
        .iter()
        .flat_map(|offering| offering.plans.iter())
        .find(|plan| plan.name == name)
        .cloned()
        .ok_or_else(|| CfError::not_found("Service plan", name))
}

fn target_names<C: ConfigReader>(config: &C) -> (String, String) {
    (
        config
            .organization_fields()
            .map(|org| org.name.clone())
            .unwrap_or_default(),
        config
            .space_fields()
            .map(|space| space.name.clone())
            .unwrap_or_default(),
    )
}

fn space_guid<C: ConfigReader>(config: &C) -> String {
    config
        .space_fields()
        .map(|space| space.guid.clone())
        .unwrap_or_default()
}

/// `create-service SERVICE PLAN SERVICE_INSTANCE`. Creating an instance
/// that already exists is not an error.
pub struct CreateService<C, R> {
    config: Arc<C>,
    service_repo: R,
}

impl<C: ConfigReader, R: ServiceRepository> CreateService<C, R> {
    pub fn new(config: Arc<C>, service_repo: R) -> Self {
        Self {
            config,
            service_repo,
        }
    }

    pub async fn create_service(
        &self,
        service_name: &str,
        plan_name: &str,
        instance_name: &str,
    ) -> Result<()> {
        let space_guid = space_guid(self.config.as_ref());
        let offerings = self
            .service_repo
            .find_service_offerings_for_space_by_label(&space_guid, service_name)
            .await?;
        let offerings = find_offerings(&offerings, service_name)?;
        let plan = find_plan_from_offerings(&offerings, plan_name)?;

        self.service_repo
            .create_service_instance(instance_name, &plan.guid, &space_guid)
            .await
    }
}

#[async_trait]
impl<C: ConfigReader, R: ServiceRepository> Command for CreateService<C, R> {
    fn name(&self) -> &'static str {
        "create-service"
    }

    fn usage(&self) -> &'static str {
        "cf create-service SERVICE PLAN SERVICE_INSTANCE"
    }

    fn requirements(
        &self,
        factory: &dyn RequirementFactory,
        args: &[String],
    ) -> Result<Vec<Box<dyn Requirement>>> {
        check_arg_count(self.name(), args, 3)?;
        Ok(vec![
            factory.new_login_requirement(),
            factory.new_targeted_space_requirement(),
        ])
    }

    async fn run(&self, args: &[String], ui: &dyn Ui) -> Result<CommandOutcome> {
        let [service_name, plan_name, instance_name] = args else {
            return Err(CfError::usage(self.name(), "requires 3 argument(s)"));
        };

        let (org, space) = target_names(self.config.as_ref());
        ui.say(&format!(
            "Creating service {} in org {} / space {} as {}...",
            instance_name,
            org,
            space,
            self.config.username()
        ));

        match self.create_service(service_name, plan_name, instance_name).await {
            Ok(()) => Ok(CommandOutcome::Succeeded),
            Err(err @ CfError::AlreadyExists { .. }) => {
                tracing::warn!("{}", err);
                Ok(CommandOutcome::SucceededWithWarning(err.to_string()))
            }
            Err(err) => Err(err),
        }
    }
}

/// `delete-service SERVICE_INSTANCE`. A missing instance is reported as a
/// warning.
pub struct DeleteService<C, R> {
    config: Arc<C>,
    service_repo: R,
}

impl<C: ConfigReader, R: ServiceRepository> DeleteService<C, R> {
    pub fn new(config: Arc<C>, service_repo: R) -> Self {
        Self {
            config,
            service_repo,
        }
    }
}

#[async_trait]
impl<C: ConfigReader, R: ServiceRepository> Command for DeleteService<C, R> {
    fn name(&self) -> &'static str {
        "delete-service"
    }

    fn usage(&self) -> &'static str {
        "cf delete-service SERVICE_INSTANCE"
    }

    fn requirements(
        &self,
        factory: &dyn RequirementFactory,
        args: &[String],
    ) -> Result<Vec<Box<dyn Requirement>>> {
        check_arg_count(self.name(), args, 1)?;
        Ok(vec![
            factory.new_login_requirement(),
            factory.new_targeted_space_requirement(),
        ])
    }

    async fn run(&self, args: &[String], ui: &dyn Ui) -> Result<CommandOutcome> {
        let [instance_name] = args else {
            return Err(CfError::usage(self.name(), "requires 1 argument(s)"));
        };

        ui.say(&format!(
            "Deleting service {} as {}...",
            instance_name,
            self.config.username()
        ));

        let space_guid = space_guid(self.config.as_ref());
        let instance = match self
            .service_repo
            .find_service_instance_by_name(&space_guid, instance_name)
            .await
        {
            Ok(instance) => instance,
            Err(CfError::NotFound { .. }) => {
                return Ok(CommandOutcome::SucceededWithWarning(format!(
                    "Service {} does not exist.",
                    instance_name
                )));
            }
            Err(err) => return Err(err),
        };

        self.service_repo.delete_service_instance(&instance).await?;
        Ok(CommandOutcome::Succeeded)
    }
}
