pub mod gateway;
pub mod repository;
pub mod resources;

pub use crate::domain::model::{
    Organization, OrganizationFields, ServiceAuthTokenFields, ServiceInstanceFields,
    ServiceOffering, ServicePlanFields, SpaceFields,
};
pub use crate::domain::ports::{
    ConfigReader, Gateway, OrganizationRepository, ServiceAuthTokenRepository, ServiceRepository,
    Ui,
};
pub use crate::utils::error::Result;
