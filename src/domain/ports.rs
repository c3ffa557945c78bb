use crate::domain::model::{
    Organization, OrganizationFields, ServiceAuthTokenFields, ServiceInstanceFields,
    ServiceOffering, SpaceFields,
};
use crate::utils::error::{CfError, Result};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;

/// Read-only view of the CLI configuration store.
pub trait ConfigReader: Send + Sync {
    fn api_endpoint(&self) -> &str;
    /// Full `Authorization` header value, e.g. `bearer eyJ...`.
    fn access_token(&self) -> &str;
    fn username(&self) -> &str;
    fn organization_fields(&self) -> Option<&OrganizationFields>;
    fn space_fields(&self) -> Option<&SpaceFields>;

    fn request_timeout(&self) -> Option<Duration> {
        None
    }

    fn skip_ssl_validation(&self) -> bool {
        false
    }

    fn is_logged_in(&self) -> bool {
        !self.access_token().trim().is_empty()
    }

    fn has_organization(&self) -> bool {
        self.organization_fields()
            .map(|org| !org.guid.is_empty())
            .unwrap_or(false)
    }

    fn has_space(&self) -> bool {
        self.space_fields()
            .map(|space| !space.guid.is_empty())
            .unwrap_or(false)
    }
}

/// Authenticated HTTP transport. Urls are absolute.
pub trait Gateway: Send + Sync {
    fn get(&self, url: &str) -> impl Future<Output = Result<String>> + Send;

    fn create_resource(
        &self,
        url: &str,
        body: serde_json::Value,
    ) -> impl Future<Output = Result<()>> + Send;

    fn update_resource(
        &self,
        url: &str,
        body: serde_json::Value,
    ) -> impl Future<Output = Result<()>> + Send;

    fn delete_resource(&self, url: &str) -> impl Future<Output = Result<()>> + Send;

    fn get_resource<T>(&self, url: &str) -> impl Future<Output = Result<T>> + Send
    where
        T: DeserializeOwned + Send,
    {
        async move {
            let body = self.get(url).await?;
            serde_json::from_str(&body).map_err(CfError::InvalidResponse)
        }
    }
}

pub trait OrganizationRepository: Send + Sync {
    fn find_all(&self) -> impl Future<Output = Result<Vec<Organization>>> + Send;
    fn find_by_name(&self, name: &str) -> impl Future<Output = Result<Organization>> + Send;
}

pub trait ServiceAuthTokenRepository: Send + Sync {
    fn find_all(&self) -> impl Future<Output = Result<Vec<ServiceAuthTokenFields>>> + Send;

    fn find_by_label_and_provider(
        &self,
        label: &str,
        provider: &str,
    ) -> impl Future<Output = Result<ServiceAuthTokenFields>> + Send;

    fn create(&self, auth_token: &ServiceAuthTokenFields) -> impl Future<Output = Result<()>> + Send;
    fn update(&self, auth_token: &ServiceAuthTokenFields) -> impl Future<Output = Result<()>> + Send;
    fn delete(&self, auth_token: &ServiceAuthTokenFields) -> impl Future<Output = Result<()>> + Send;
}

pub trait ServiceRepository: Send + Sync {
    fn find_service_offerings_for_space_by_label(
        &self,
        space_guid: &str,
        label: &str,
    ) -> impl Future<Output = Result<Vec<ServiceOffering>>> + Send;

    fn create_service_instance(
        &self,
        name: &str,
        plan_guid: &str,
        space_guid: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    fn find_service_instance_by_name(
        &self,
        space_guid: &str,
        name: &str,
    ) -> impl Future<Output = Result<ServiceInstanceFields>> + Send;

    fn delete_service_instance(
        &self,
        instance: &ServiceInstanceFields,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Terminal output sink used by commands and the command runner.
pub trait Ui: Send + Sync {
    fn say(&self, message: &str);
    fn ok(&self);
    fn warn(&self, message: &str);
    fn failed(&self, message: &str);
    fn failed_with_usage(&self, command: &str, usage: &str);
}
