use crate::core::repository::{ResourceMapping, ResourceRepository, WritableResource};
use crate::core::resources::Filter;
use crate::core::{ConfigReader, Gateway, ServiceAuthTokenFields, ServiceAuthTokenRepository};
use crate::utils::error::Result;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ServiceAuthTokenEntity {
    pub label: String,
    pub provider: String,
}

pub struct ServiceAuthTokenMapping;

impl ResourceMapping for ServiceAuthTokenMapping {
    type Entity = ServiceAuthTokenEntity;
    type Model = ServiceAuthTokenFields;

    const RESOURCE_TYPE: &'static str = "Service Auth Token";
    const COLLECTION: &'static str = "service_auth_tokens";
    const NAME_TAKEN_CODES: &'static [&'static str] = &["50002"];

    fn to_model(guid: String, entity: ServiceAuthTokenEntity) -> ServiceAuthTokenFields {
        ServiceAuthTokenFields {
            guid,
            label: entity.label,
            provider: entity.provider,
            token: String::new(),
        }
    }
}

impl WritableResource for ServiceAuthTokenMapping {
    fn guid(model: &ServiceAuthTokenFields) -> &str {
        &model.guid
    }

    fn display_key(model: &ServiceAuthTokenFields) -> String {
        format!("{} {}", model.label, model.provider)
    }

    fn create_body(model: &ServiceAuthTokenFields) -> serde_json::Value {
        serde_json::json!({
            "label": model.label,
            "provider": model.provider,
            "token": model.token,
        })
    }

    fn update_body(model: &ServiceAuthTokenFields) -> serde_json::Value {
        serde_json::json!({ "token": model.token })
    }
}

pub struct CloudControllerServiceAuthTokenRepository<G, C> {
    resources: ResourceRepository<G, C, ServiceAuthTokenMapping>,
}

impl<G: Gateway, C: ConfigReader> CloudControllerServiceAuthTokenRepository<G, C> {
    pub fn new(config: Arc<C>, gateway: Arc<G>) -> Self {
        Self {
            resources: ResourceRepository::new(config, gateway),
        }
    }
}

impl<G: Gateway, C: ConfigReader> ServiceAuthTokenRepository
    for CloudControllerServiceAuthTokenRepository<G, C>
{
    async fn find_all(&self) -> Result<Vec<ServiceAuthTokenFields>> {
        self.resources.list().await
    }

    async fn find_by_label_and_provider(
        &self,
        label: &str,
        provider: &str,
    ) -> Result<ServiceAuthTokenFields> {
        let filter = Filter::by("label", label).and("provider", provider);
        self.resources
            .find_one_by_filter(&filter, &format!("{} {}", label, provider))
            .await
    }

    async fn create(&self, auth_token: &ServiceAuthTokenFields) -> Result<()> {
        self.resources.create(auth_token).await
    }

    async fn update(&self, auth_token: &ServiceAuthTokenFields) -> Result<()> {
        self.resources.update(auth_token).await
    }

    async fn delete(&self, auth_token: &ServiceAuthTokenFields) -> Result<()> {
        self.resources.delete(auth_token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mysql_token() -> ServiceAuthTokenFields {
        ServiceAuthTokenFields {
            guid: "tok-1".to_string(),
            label: "mysql".to_string(),
            provider: "core".to_string(),
            token: "secret".to_string(),
        }
    }

    #[test]
    fn test_token_is_never_read_back() {
        let entity: ServiceAuthTokenEntity =
            serde_json::from_value(json!({"label": "mysql", "provider": "core", "token": "leak"}))
                .unwrap();
        let model = ServiceAuthTokenMapping::to_model("tok-1".to_string(), entity);

        assert_eq!(model.guid, "tok-1");
        assert!(model.token.is_empty());
    }

    #[test]
    fn test_write_bodies() {
        let token = mysql_token();

        assert_eq!(
            ServiceAuthTokenMapping::create_body(&token),
            json!({"label": "mysql", "provider": "core", "token": "secret"})
        );
        assert_eq!(
            ServiceAuthTokenMapping::update_body(&token),
            json!({"token": "secret"})
        );
        assert_eq!(ServiceAuthTokenMapping::display_key(&token), "mysql core");
    }
}
