//! Cloud controller repositories, one per entity, all backed by the
//! generic `ResourceRepository`.

pub mod organizations;
pub mod service_auth_tokens;
pub mod services;

pub use organizations::CloudControllerOrganizationRepository;
pub use service_auth_tokens::CloudControllerServiceAuthTokenRepository;
pub use services::CloudControllerServiceRepository;
