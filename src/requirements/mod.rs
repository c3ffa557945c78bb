//! Preconditions a command declares before it is allowed to run.
//!
//! A command hands the runner an ordered list of requirements; the runner
//! checks them front to back and stops at the first one that fails, so the
//! command's action never sees an unmet precondition.

mod targets;

pub use targets::{
    ApiEndpointRequirement, LoginRequirement, TargetedOrganizationRequirement,
    TargetedSpaceRequirement,
};

use crate::domain::ports::ConfigReader;
use crate::utils::error::Result;
use std::sync::Arc;

pub trait Requirement: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;
    fn check(&self) -> Result<()>;
}

/// Checks `requirements` in order, returning the first failure.
pub fn check_all(requirements: &[Box<dyn Requirement>]) -> Result<()> {
    for requirement in requirements {
        tracing::debug!("Checking requirement: {}", requirement.name());
        requirement.check()?;
    }
    Ok(())
}

pub trait RequirementFactory: Send + Sync {
    fn new_api_endpoint_requirement(&self) -> Box<dyn Requirement>;
    fn new_login_requirement(&self) -> Box<dyn Requirement>;
    fn new_targeted_organization_requirement(&self) -> Box<dyn Requirement>;
    fn new_targeted_space_requirement(&self) -> Box<dyn Requirement>;
}

pub struct ConfigRequirementFactory<C: ConfigReader> {
    config: Arc<C>,
}

impl<C: ConfigReader> ConfigRequirementFactory<C> {
    pub fn new(config: Arc<C>) -> Self {
        Self { config }
    }
}

impl<C: ConfigReader + 'static> RequirementFactory for ConfigRequirementFactory<C> {
    fn new_api_endpoint_requirement(&self) -> Box<dyn Requirement> {
        Box::new(ApiEndpointRequirement::new(Arc::clone(&self.config)))
    }

    fn new_login_requirement(&self) -> Box<dyn Requirement> {
        Box::new(LoginRequirement::new(Arc::clone(&self.config)))
    }

    fn new_targeted_organization_requirement(&self) -> Box<dyn Requirement> {
        Box::new(TargetedOrganizationRequirement::new(Arc::clone(&self.config)))
    }

    fn new_targeted_space_requirement(&self) -> Box<dyn Requirement> {
        Box::new(TargetedSpaceRequirement::new(Arc::clone(&self.config)))
    }
}
