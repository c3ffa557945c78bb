use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;

use cf_cli::api::{
    CloudControllerOrganizationRepository, CloudControllerServiceAuthTokenRepository,
    CloudControllerServiceRepository,
};
use cf_cli::core::{OrganizationRepository, ServiceAuthTokenRepository, ServiceRepository};
use cf_cli::domain::model::ServiceAuthTokenFields;
use cf_cli::{CfError, CloudControllerGateway, TomlConfig};

fn config_for(server: &MockServer) -> Arc<TomlConfig> {
    let config = TomlConfig::from_toml_str(&format!(
        r#"
target = "{}"
access_token = "bearer test-token"
username = "admin"
request_timeout_seconds = 5
"#,
        server.base_url()
    ))
    .unwrap();
    Arc::new(config)
}

fn gateway_for(config: &Arc<TomlConfig>) -> Arc<CloudControllerGateway<TomlConfig>> {
    Arc::new(CloudControllerGateway::new(Arc::clone(config)).unwrap())
}

#[tokio::test]
async fn test_requests_carry_access_token() {
    let server = MockServer::start();
    let orgs_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/organizations")
            .header("authorization", "bearer test-token")
            .header("accept", "application/json");
        then.status(200).json_body(json!({
            "resources": [
                {"metadata": {"guid": "org-1"}, "entity": {"name": "acme"}}
            ]
        }));
    });

    let config = config_for(&server);
    let repo = CloudControllerOrganizationRepository::new(Arc::clone(&config), gateway_for(&config));
    let orgs = repo.find_all().await.unwrap();

    orgs_mock.assert();
    assert_eq!(orgs.len(), 1);
    assert_eq!(orgs[0].guid, "org-1");
}

#[tokio::test]
async fn test_org_lookup_ignores_case() {
    let server = MockServer::start();
    let orgs_mock = server.mock(|when, then| {
        when.method(GET).path("/v2/organizations");
        then.status(200).json_body(json!({
            "resources": [
                {"metadata": {"guid": "org-1"}, "entity": {"name": "Acme"}},
                {"metadata": {"guid": "org-2"}, "entity": {"name": "initech"}}
            ]
        }));
    });

    let config = config_for(&server);
    let repo = CloudControllerOrganizationRepository::new(Arc::clone(&config), gateway_for(&config));

    let lower = repo.find_by_name("acme").await.unwrap();
    let upper = repo.find_by_name("ACME").await.unwrap();
    assert_eq!(lower.guid, "org-1");
    assert_eq!(lower, upper);

    let err = repo.find_by_name("globex").await.unwrap_err();
    assert!(matches!(err, CfError::NotFound { .. }));
    assert_eq!(orgs_mock.hits(), 3);
}

#[tokio::test]
async fn test_structured_error_body_is_surfaced() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/organizations");
        then.status(403).json_body(json!({
            "code": 10003,
            "description": "You are not authorized to perform the requested action",
            "error_code": "CF-NotAuthorized"
        }));
    });

    let config = config_for(&server);
    let repo = CloudControllerOrganizationRepository::new(Arc::clone(&config), gateway_for(&config));
    let err = repo.find_all().await.unwrap_err();

    match err {
        CfError::RemoteApi {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 403);
            assert_eq!(code.as_deref(), Some("10003"));
            assert_eq!(message, "You are not authorized to perform the requested action");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unstructured_error_body_is_kept_raw() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/service_auth_tokens");
        then.status(502).body("upstream gateway exploded");
    });

    let config = config_for(&server);
    let repo =
        CloudControllerServiceAuthTokenRepository::new(Arc::clone(&config), gateway_for(&config));
    let err = repo.find_all().await.unwrap_err();

    assert!(matches!(
        err,
        CfError::RemoteApi { status: 502, code: None, ref message } if message == "upstream gateway exploded"
    ));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let config = Arc::new(
        TomlConfig::from_toml_str(
            r#"
target = "http://127.0.0.1:1"
access_token = "bearer test-token"
request_timeout_seconds = 2
"#,
        )
        .unwrap(),
    );
    let repo = CloudControllerOrganizationRepository::new(Arc::clone(&config), gateway_for(&config));

    let err = repo.find_all().await.unwrap_err();
    assert!(matches!(err, CfError::Transport(_)));
}

#[tokio::test]
async fn test_auth_token_lookup_filters_server_side() {
    let server = MockServer::start();
    let found = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/service_auth_tokens")
            .query_param("q", "label:mysql;provider:core");
        then.status(200).json_body(json!({
            "resources": [
                {"metadata": {"guid": "tok-1"}, "entity": {"label": "mysql", "provider": "core"}}
            ]
        }));
    });
    let missing = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/service_auth_tokens")
            .query_param("q", "label:redis;provider:core");
        then.status(200).json_body(json!({"resources": []}));
    });

    let config = config_for(&server);
    let repo =
        CloudControllerServiceAuthTokenRepository::new(Arc::clone(&config), gateway_for(&config));

    let token = repo.find_by_label_and_provider("mysql", "core").await.unwrap();
    assert_eq!(
        token,
        ServiceAuthTokenFields {
            guid: "tok-1".to_string(),
            label: "mysql".to_string(),
            provider: "core".to_string(),
            token: String::new(),
        }
    );

    let err = repo
        .find_by_label_and_provider("redis", "core")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Service Auth Token redis core not found");

    found.assert();
    missing.assert();
}

#[tokio::test]
async fn test_auth_token_update_sends_only_token() {
    let server = MockServer::start();
    let update = server.mock(|when, then| {
        when.method(PUT)
            .path("/v2/service_auth_tokens/tok-1")
            .json_body(json!({"token": "new-secret"}));
        then.status(201).json_body(json!({}));
    });

    let config = config_for(&server);
    let repo =
        CloudControllerServiceAuthTokenRepository::new(Arc::clone(&config), gateway_for(&config));
    let token = ServiceAuthTokenFields {
        guid: "tok-1".to_string(),
        label: "mysql".to_string(),
        provider: "core".to_string(),
        token: "new-secret".to_string(),
    };

    repo.update(&token).await.unwrap();
    update.assert();
}

#[tokio::test]
async fn test_offerings_include_inline_plans() {
    let server = MockServer::start();
    let offerings = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/spaces/space-guid/services")
            .query_param("q", "label:mysql")
            .query_param("inline-relations-depth", "1");
        then.status(200).json_body(json!({
            "resources": [{
                "metadata": {"guid": "svc-1"},
                "entity": {
                    "label": "mysql",
                    "provider": "core",
                    "description": "MySQL databases",
                    "service_plans": [
                        {"metadata": {"guid": "plan-free"}, "entity": {"name": "free"}},
                        {"metadata": {"guid": "plan-pro"}, "entity": {"name": "pro"}}
                    ]
                }
            }]
        }));
    });

    let config = config_for(&server);
    let repo = CloudControllerServiceRepository::new(Arc::clone(&config), gateway_for(&config));
    let found = repo
        .find_service_offerings_for_space_by_label("space-guid", "mysql")
        .await
        .unwrap();

    offerings.assert();
    assert_eq!(found.len(), 1);
    let plan_names: Vec<&str> = found[0].plans.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(plan_names, vec!["free", "pro"]);
    assert_eq!(found[0].plans[1].guid, "plan-pro");
}

#[tokio::test]
async fn test_service_instance_name_taken_is_already_exists() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST).path("/v2/service_instances").json_body(json!({
            "name": "my-db",
            "service_plan_guid": "plan-free",
            "space_guid": "space-guid"
        }));
        then.status(400).json_body(json!({
            "code": 60002,
            "description": "The service instance name is taken: my-db",
            "error_code": "CF-ServiceInstanceNameTaken"
        }));
    });

    let config = config_for(&server);
    let repo = CloudControllerServiceRepository::new(Arc::clone(&config), gateway_for(&config));
    let err = repo
        .create_service_instance("my-db", "plan-free", "space-guid")
        .await
        .unwrap_err();

    create.assert();
    assert!(matches!(err, CfError::AlreadyExists { .. }));
    assert_eq!(err.to_string(), "Service instance my-db already exists");
}
