use crate::core::repository::{ResourceMapping, ResourceRepository};
use crate::core::{ConfigReader, Gateway, Organization, OrganizationRepository};
use crate::utils::error::{CfError, Result};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct OrganizationEntity {
    pub name: String,
}

pub struct OrganizationMapping;

impl ResourceMapping for OrganizationMapping {
    type Entity = OrganizationEntity;
    type Model = Organization;

    const RESOURCE_TYPE: &'static str = "Organization";
    const COLLECTION: &'static str = "organizations";

    fn to_model(guid: String, entity: OrganizationEntity) -> Organization {
        Organization {
            name: entity.name,
            guid,
        }
    }
}

pub struct CloudControllerOrganizationRepository<G, C> {
    resources: ResourceRepository<G, C, OrganizationMapping>,
}

impl<G: Gateway, C: ConfigReader> CloudControllerOrganizationRepository<G, C> {
    pub fn new(config: Arc<C>, gateway: Arc<G>) -> Self {
        Self {
            resources: ResourceRepository::new(config, gateway),
        }
    }
}

impl<G: Gateway, C: ConfigReader> OrganizationRepository for CloudControllerOrganizationRepository<G, C> {
    async fn find_all(&self) -> Result<Vec<Organization>> {
        self.resources.list().await
    }

    /// Case-insensitive match over the complete listing. Duplicate names
    /// resolve to the first one the server returns.
    async fn find_by_name(&self, name: &str) -> Result<Organization> {
        let wanted = name.to_lowercase();
        self.find_all()
            .await?
            .into_iter()
            .find(|org| org.name.to_lowercase() == wanted)
            .ok_or_else(|| CfError::not_found(OrganizationMapping::RESOURCE_TYPE, name))
    }
}
