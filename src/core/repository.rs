use crate::core::resources::{Filter, PaginatedResources};
use crate::domain::ports::{ConfigReader, Gateway};
use crate::utils::error::{CfError, Result};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use url::form_urlencoded;

/// Describes how one entity type lives under `/v2`.
pub trait ResourceMapping: Send + Sync + 'static {
    /// Shape of the `entity` object in listings.
    type Entity: DeserializeOwned + Send;
    type Model: Send + Sync;

    /// Human name used in not-found and already-exists errors.
    const RESOURCE_TYPE: &'static str;
    /// Collection path below `/v2`, e.g. `service_auth_tokens`.
    const COLLECTION: &'static str;
    /// Remote error codes that mean "a resource with this name exists".
    const NAME_TAKEN_CODES: &'static [&'static str] = &[];

    fn to_model(guid: String, entity: Self::Entity) -> Self::Model;
}

/// Entities the CLI may create, update and delete.
pub trait WritableResource: ResourceMapping {
    fn guid(model: &Self::Model) -> &str;
    fn display_key(model: &Self::Model) -> String;
    /// Body for POST; never includes the server-assigned guid.
    fn create_body(model: &Self::Model) -> serde_json::Value;
    /// Body for PUT; only the mutable fields.
    fn update_body(model: &Self::Model) -> serde_json::Value;
}

pub struct ResourceRepository<G, C, M> {
    gateway: Arc<G>,
    config: Arc<C>,
    mapping: PhantomData<fn() -> M>,
}

impl<G, C, M> Clone for ResourceRepository<G, C, M> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            config: Arc::clone(&self.config),
            mapping: PhantomData,
        }
    }
}

impl<G: Gateway, C: ConfigReader, M: ResourceMapping> ResourceRepository<G, C, M> {
    pub fn new(config: Arc<C>, gateway: Arc<G>) -> Self {
        Self {
            gateway,
            config,
            mapping: PhantomData,
        }
    }

    fn endpoint(&self) -> &str {
        self.config.api_endpoint().trim_end_matches('/')
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/v2/{}", self.endpoint(), path.trim_start_matches('/'))
    }

    pub fn collection_url(&self) -> String {
        self.url_for(M::COLLECTION)
    }

    pub fn resource_url(&self, guid: &str) -> String {
        format!("{}/{}", self.collection_url(), guid)
    }

    /// `next_url` is usually relative to the endpoint (`/v2/...?page=2`).
    fn absolute_url(&self, next_url: &str) -> String {
        if next_url.starts_with("http://") || next_url.starts_with("https://") {
            next_url.to_string()
        } else {
            format!("{}/{}", self.endpoint(), next_url.trim_start_matches('/'))
        }
    }

    pub async fn list(&self) -> Result<Vec<M::Model>> {
        self.fetch_all(self.collection_url()).await
    }

    pub async fn find_by_filter(&self, filter: &Filter) -> Result<Vec<M::Model>> {
        self.list_at(M::COLLECTION, Some(filter), &[]).await
    }

    /// First match of a server-side filter, or `NotFound` naming `key`.
    pub async fn find_one_by_filter(&self, filter: &Filter, key: &str) -> Result<M::Model> {
        self.find_by_filter(filter)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CfError::not_found(M::RESOURCE_TYPE, key))
    }

    /// Lists a collection under an arbitrary `/v2` path, such as a
    /// space-scoped listing.
    pub async fn list_at(
        &self,
        path: &str,
        filter: Option<&Filter>,
        extra_query: &[(&str, &str)],
    ) -> Result<Vec<M::Model>> {
        let query = {
            let mut serializer = form_urlencoded::Serializer::new(String::new());
            if let Some(filter) = filter.filter(|f| !f.is_empty()) {
                serializer.append_pair("q", &filter.predicate());
            }
            for (key, value) in extra_query {
                serializer.append_pair(key, value);
            }
            serializer.finish()
        };

        let url = if query.is_empty() {
            self.url_for(path)
        } else {
            format!("{}?{}", self.url_for(path), query)
        };
        self.fetch_all(url).await
    }

    /// Walks `next_url` one page at a time. Any failing page fails the
    /// whole listing.
    async fn fetch_all(&self, first_url: String) -> Result<Vec<M::Model>> {
        let mut models = Vec::new();
        let mut next = Some(first_url);
        let mut pages = 0usize;

        while let Some(url) = next.take() {
            pages += 1;
            tracing::debug!("Fetching {} page {}: {}", M::RESOURCE_TYPE, pages, url);

            let page: PaginatedResources<M::Entity> = self.gateway.get_resource(&url).await?;
            next = page
                .next_url
                .filter(|next_url| !next_url.is_empty())
                .map(|next_url| self.absolute_url(&next_url));

            models.extend(
                page.resources
                    .into_iter()
                    .map(|resource| M::to_model(resource.metadata.guid, resource.entity)),
            );
        }

        tracing::debug!(
            "Fetched {} {} record(s) across {} page(s)",
            models.len(),
            M::RESOURCE_TYPE,
            pages
        );
        Ok(models)
    }
}

impl<G: Gateway, C: ConfigReader, M: WritableResource> ResourceRepository<G, C, M> {
    pub async fn create(&self, model: &M::Model) -> Result<()> {
        let key = M::display_key(model);
        let body = M::create_body(model);

        match self.gateway.create_resource(&self.collection_url(), body).await {
            Err(err) if is_name_taken::<M>(&err) => {
                tracing::debug!("{} {} already exists: {}", M::RESOURCE_TYPE, key, err);
                Err(CfError::AlreadyExists {
                    resource_type: M::RESOURCE_TYPE.to_string(),
                    key,
                })
            }
            other => other,
        }
    }

    pub async fn update(&self, model: &M::Model) -> Result<()> {
        let url = self.resource_url(M::guid(model));
        self.gateway.update_resource(&url, M::update_body(model)).await
    }

    pub async fn delete(&self, model: &M::Model) -> Result<()> {
        let url = self.resource_url(M::guid(model));
        self.gateway.delete_resource(&url).await
    }
}

fn is_name_taken<M: ResourceMapping>(err: &CfError) -> bool {
    match err {
        CfError::RemoteApi { status, code, .. } => {
            *status == 409
                || code
                    .as_deref()
                    .map(|code| M::NAME_TAKEN_CODES.contains(&code))
                    .unwrap_or(false)
        }
        _ => false,
    }
}
