use crate::domain::ports::{ConfigReader, Gateway};
use crate::utils::error::{CfError, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use std::sync::Arc;

/// Error body returned by the cloud controller on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorPayload {
    code: Option<u64>,
    description: Option<String>,
    error_code: Option<String>,
}

pub struct CloudControllerGateway<C: ConfigReader> {
    config: Arc<C>,
    client: Client,
}

impl<C: ConfigReader> CloudControllerGateway<C> {
    pub fn new(config: Arc<C>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        if config.skip_ssl_validation() {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    async fn perform(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<String> {
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(AUTHORIZATION, self.config.access_token())
            .header(ACCEPT, "application/json");

        if let Some(body) = &body {
            tracing::debug!("REQUEST {} {} body: {}", method, url, redacted(body));
            request = request.json(body);
        } else {
            tracing::debug!("REQUEST {} {}", method, url);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::debug!("RESPONSE {} {} status: {}", method, url, status);

        if !status.is_success() {
            let err = api_error_from_response(status, &text);
            tracing::debug!("RESPONSE {} {} error: {}", method, url, err);
            return Err(err);
        }

        Ok(text)
    }
}

impl<C: ConfigReader> Gateway for CloudControllerGateway<C> {
    async fn get(&self, url: &str) -> Result<String> {
        self.perform(Method::GET, url, None).await
    }

    async fn create_resource(&self, url: &str, body: serde_json::Value) -> Result<()> {
        self.perform(Method::POST, url, Some(body)).await.map(|_| ())
    }

    async fn update_resource(&self, url: &str, body: serde_json::Value) -> Result<()> {
        self.perform(Method::PUT, url, Some(body)).await.map(|_| ())
    }

    async fn delete_resource(&self, url: &str) -> Result<()> {
        self.perform(Method::DELETE, url, None).await.map(|_| ())
    }
}

/// Maps a non-2xx response onto `RemoteApi`, falling back to the raw body
/// when it is not a cloud controller error document.
fn api_error_from_response(status: StatusCode, body: &str) -> CfError {
    let parsed = serde_json::from_str::<ApiErrorPayload>(body)
        .ok()
        .filter(|payload| payload.code.is_some() || payload.description.is_some());

    match parsed {
        Some(payload) => CfError::RemoteApi {
            status: status.as_u16(),
            code: payload
                .code
                .map(|code| code.to_string())
                .or(payload.error_code),
            message: payload.description.unwrap_or_else(|| status_reason(status)),
        },
        None => {
            let trimmed = body.trim();
            CfError::RemoteApi {
                status: status.as_u16(),
                code: None,
                message: if trimmed.is_empty() {
                    status_reason(status)
                } else {
                    trimmed.to_string()
                },
            }
        }
    }
}

/// Copy of a request body safe for trace output.
fn redacted(body: &serde_json::Value) -> serde_json::Value {
    let mut copy = body.clone();
    if let Some(token) = copy.get_mut("token") {
        *token = serde_json::Value::String("[PRIVATE DATA HIDDEN]".to_string());
    }
    copy
}

fn status_reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unknown status")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_error_body() {
        let body = r#"{"code": 60002, "description": "The service instance name is taken: my-db", "error_code": "CF-ServiceInstanceNameTaken"}"#;
        match api_error_from_response(StatusCode::BAD_REQUEST, body) {
            CfError::RemoteApi {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 400);
                assert_eq!(code.as_deref(), Some("60002"));
                assert_eq!(message, "The service instance name is taken: my-db");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_error_code_string_used_when_numeric_code_missing() {
        let body = r#"{"description": "Unknown request", "error_code": "CF-NotFound"}"#;
        match api_error_from_response(StatusCode::NOT_FOUND, body) {
            CfError::RemoteApi { code, .. } => assert_eq!(code.as_deref(), Some("CF-NotFound")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_error_body_is_wrapped() {
        match api_error_from_response(StatusCode::BAD_GATEWAY, "<html>upstream down</html>") {
            CfError::RemoteApi {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 502);
                assert!(code.is_none());
                assert_eq!(message, "<html>upstream down</html>");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_error_body_uses_status_reason() {
        match api_error_from_response(StatusCode::INTERNAL_SERVER_ERROR, "") {
            CfError::RemoteApi { message, .. } => assert_eq!(message, "Internal Server Error"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_trace_body_hides_token() {
        let body = serde_json::json!({"label": "mysql", "provider": "core", "token": "s3cret"});
        let shown = redacted(&body);
        assert_eq!(shown["token"], "[PRIVATE DATA HIDDEN]");
        assert_eq!(shown["label"], "mysql");
        assert_eq!(body["token"], "s3cret");
    }

    #[test]
    fn test_json_without_error_fields_is_wrapped() {
        match api_error_from_response(StatusCode::FORBIDDEN, r#"{"unexpected": true}"#) {
            CfError::RemoteApi { code, message, .. } => {
                assert!(code.is_none());
                assert_eq!(message, r#"{"unexpected": true}"#);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
