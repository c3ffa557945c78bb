use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    pub guid: String,
}

/// Org currently targeted in the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationFields {
    pub name: String,
    pub guid: String,
}

/// Space currently targeted in the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceFields {
    pub name: String,
    pub guid: String,
}

/// `token` is write-only: listings leave it empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceAuthTokenFields {
    pub guid: String,
    pub label: String,
    pub provider: String,
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServicePlanFields {
    pub name: String,
    pub guid: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceOffering {
    pub guid: String,
    pub label: String,
    pub provider: String,
    pub description: String,
    pub plans: Vec<ServicePlanFields>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceInstanceFields {
    pub guid: String,
    pub name: String,
    pub plan_guid: String,
    pub space_guid: String,
}
