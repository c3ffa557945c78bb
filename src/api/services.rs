use crate::core::repository::{ResourceMapping, ResourceRepository, WritableResource};
use crate::core::resources::{Filter, Resource};
use crate::core::{
    ConfigReader, Gateway, ServiceInstanceFields, ServiceOffering, ServicePlanFields,
    ServiceRepository,
};
use crate::utils::error::{CfError, Result};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ServicePlanEntity {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ServiceOfferingEntity {
    pub label: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub description: String,
    /// Present when listed with `inline-relations-depth=1`.
    #[serde(default)]
    pub service_plans: Vec<Resource<ServicePlanEntity>>,
}

pub struct ServiceOfferingMapping;

impl ResourceMapping for ServiceOfferingMapping {
    type Entity = ServiceOfferingEntity;
    type Model = ServiceOffering;

    const RESOURCE_TYPE: &'static str = "Service offering";
    const COLLECTION: &'static str = "services";

    fn to_model(guid: String, entity: ServiceOfferingEntity) -> ServiceOffering {
        ServiceOffering {
            guid,
            label: entity.label,
            provider: entity.provider,
            description: entity.description,
            plans: entity
                .service_plans
                .into_iter()
                .map(|plan| ServicePlanFields {
                    name: plan.entity.name,
                    guid: plan.metadata.guid,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ServiceInstanceEntity {
    pub name: String,
    #[serde(default)]
    pub service_plan_guid: String,
    #[serde(default)]
    pub space_guid: String,
}

pub struct ServiceInstanceMapping;

impl ResourceMapping for ServiceInstanceMapping {
    type Entity = ServiceInstanceEntity;
    type Model = ServiceInstanceFields;

    const RESOURCE_TYPE: &'static str = "Service instance";
    const COLLECTION: &'static str = "service_instances";
    const NAME_TAKEN_CODES: &'static [&'static str] = &["60002"];

    fn to_model(guid: String, entity: ServiceInstanceEntity) -> ServiceInstanceFields {
        ServiceInstanceFields {
            guid,
            name: entity.name,
            plan_guid: entity.service_plan_guid,
            space_guid: entity.space_guid,
        }
    }
}

impl WritableResource for ServiceInstanceMapping {
    fn guid(model: &ServiceInstanceFields) -> &str {
        &model.guid
    }

    fn display_key(model: &ServiceInstanceFields) -> String {
        model.name.clone()
    }

    fn create_body(model: &ServiceInstanceFields) -> serde_json::Value {
        serde_json::json!({
            "name": model.name,
            "service_plan_guid": model.plan_guid,
            "space_guid": model.space_guid,
        })
    }

    fn update_body(model: &ServiceInstanceFields) -> serde_json::Value {
        serde_json::json!({
            "name": model.name,
            "service_plan_guid": model.plan_guid,
        })
    }
}

pub struct CloudControllerServiceRepository<G, C> {
    offerings: ResourceRepository<G, C, ServiceOfferingMapping>,
    instances: ResourceRepository<G, C, ServiceInstanceMapping>,
}

impl<G: Gateway, C: ConfigReader> CloudControllerServiceRepository<G, C> {
    pub fn new(config: Arc<C>, gateway: Arc<G>) -> Self {
        Self {
            offerings: ResourceRepository::new(Arc::clone(&config), Arc::clone(&gateway)),
            instances: ResourceRepository::new(config, gateway),
        }
    }
}

impl<G: Gateway, C: ConfigReader> ServiceRepository for CloudControllerServiceRepository<G, C> {
    async fn find_service_offerings_for_space_by_label(
        &self,
        space_guid: &str,
        label: &str,
    ) -> Result<Vec<ServiceOffering>> {
        let path = format!("spaces/{}/services", space_guid);
        self.offerings
            .list_at(
                &path,
                Some(&Filter::by("label", label)),
                &[("inline-relations-depth", "1")],
            )
            .await
    }

    async fn create_service_instance(
        &self,
        name: &str,
        plan_guid: &str,
        space_guid: &str,
    ) -> Result<()> {
        let instance = ServiceInstanceFields {
            guid: String::new(),
            name: name.to_string(),
            plan_guid: plan_guid.to_string(),
            space_guid: space_guid.to_string(),
        };
        self.instances.create(&instance).await
    }

    async fn find_service_instance_by_name(
        &self,
        space_guid: &str,
        name: &str,
    ) -> Result<ServiceInstanceFields> {
        let path = format!("spaces/{}/service_instances", space_guid);
        self.instances
            .list_at(&path, Some(&Filter::by("name", name)), &[])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CfError::not_found(ServiceInstanceMapping::RESOURCE_TYPE, name))
    }

    async fn delete_service_instance(&self, instance: &ServiceInstanceFields) -> Result<()> {
        self.instances.delete(instance).await
    }
}
