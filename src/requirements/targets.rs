use super::Requirement;
use crate::domain::ports::ConfigReader;
use crate::utils::error::{CfError, Result};
use std::sync::Arc;

pub struct ApiEndpointRequirement<C> {
    config: Arc<C>,
}

impl<C: ConfigReader> ApiEndpointRequirement<C> {
    pub fn new(config: Arc<C>) -> Self {
        Self { config }
    }
}

impl<C: ConfigReader> Requirement for ApiEndpointRequirement<C> {
    fn name(&self) -> &'static str {
        "api-endpoint"
    }

    fn check(&self) -> Result<()> {
        if self.config.api_endpoint().trim().is_empty() {
            return Err(CfError::RequirementFailed {
                requirement: self.name(),
                message: "No API endpoint targeted. Use 'cf api' to set an endpoint.".to_string(),
            });
        }
        Ok(())
    }
}

/// Logged in means an endpoint and an access token are both configured.
pub struct LoginRequirement<C> {
    config: Arc<C>,
}

impl<C: ConfigReader> LoginRequirement<C> {
    pub fn new(config: Arc<C>) -> Self {
        Self { config }
    }
}

impl<C: ConfigReader> Requirement for LoginRequirement<C> {
    fn name(&self) -> &'static str {
        "login"
    }

    fn check(&self) -> Result<()> {
        ApiEndpointRequirement::new(Arc::clone(&self.config)).check()?;

        if !self.config.is_logged_in() {
            return Err(CfError::RequirementFailed {
                requirement: self.name(),
                message: "Not logged in. Use 'cf login' to log in.".to_string(),
            });
        }
        Ok(())
    }
}

pub struct TargetedOrganizationRequirement<C> {
    config: Arc<C>,
}

impl<C: ConfigReader> TargetedOrganizationRequirement<C> {
    pub fn new(config: Arc<C>) -> Self {
        Self { config }
    }
}

impl<C: ConfigReader> Requirement for TargetedOrganizationRequirement<C> {
    fn name(&self) -> &'static str {
        "targeted-organization"
    }

    fn check(&self) -> Result<()> {
        if !self.config.has_organization() {
            return Err(CfError::RequirementFailed {
                requirement: self.name(),
                message: "No org targeted, use 'cf target -o ORG' to target an org.".to_string(),
            });
        }
        Ok(())
    }
}

/// A targeted space also needs its org.
pub struct TargetedSpaceRequirement<C> {
    config: Arc<C>,
}

impl<C: ConfigReader> TargetedSpaceRequirement<C> {
    pub fn new(config: Arc<C>) -> Self {
        Self { config }
    }
}

impl<C: ConfigReader> Requirement for TargetedSpaceRequirement<C> {
    fn name(&self) -> &'static str {
        "targeted-space"
    }

    fn check(&self) -> Result<()> {
        TargetedOrganizationRequirement::new(Arc::clone(&self.config)).check()?;

        if !self.config.has_space() {
            return Err(CfError::RequirementFailed {
                requirement: self.name(),
                message: "No space targeted, use 'cf target -s SPACE' to target a space."
                    .to_string(),
            });
        }
        Ok(())
    }
}
