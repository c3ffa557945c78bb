use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    pub guid: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Resource<E> {
    pub metadata: Metadata,
    pub entity: E,
}

/// One page of a `/v2` listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResources<E> {
    #[serde(default = "Vec::new")]
    pub resources: Vec<Resource<E>>,
    #[serde(default)]
    pub next_url: Option<String>,
}

/// Server-side `q` predicate: `key:value` pairs joined with `;`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    predicates: Vec<(String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by(key: &str, value: &str) -> Self {
        Self::new().and(key, value)
    }

    pub fn and(mut self, key: &str, value: &str) -> Self {
        self.predicates.push((key.to_string(), value.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// The unencoded predicate, e.g. `label:mysql;provider:core`.
    pub fn predicate(&self) -> String {
        self.predicates
            .iter()
            .map(|(key, value)| format!("{}:{}", key, value))
            .collect::<Vec<_>>()
            .join(";")
    }
}
