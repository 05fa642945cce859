use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::domain::Headers;
use crate::error::{ReportError, Result};
use crate::utils::json::try_parse_json;

const DISABLE_SYSTEM_PROXY_ENV: &str = "CF_REPORT_DISABLE_SYSTEM_PROXY";

pub const RUNTIME_INGRESS_HOST_QUERY: &str = r#"
query Runtime($name: String!) {
    runtime(name: $name) {
        ingressHost
    }
}"#;

pub const RUNTIME_VERSION_QUERY: &str = r#"
query Runtime($name: String!) {
    runtime(name: $name) {
        runtimeVersion
    }
}"#;

/// Executes a GraphQL query and yields the response's `data` member.
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    async fn request(
        &self,
        endpoint: &str,
        headers: &Headers,
        query: &str,
        variables: Value,
    ) -> Result<Value>;
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

/// GraphQL over HTTPS POST.
#[derive(Debug, Clone)]
pub struct HttpGraphqlTransport {
    client: Client,
}

impl HttpGraphqlTransport {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent).timeout(timeout);
        if should_disable_system_proxy() {
            builder = builder.no_proxy();
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    pub fn from_config(app_config: &AppConfig) -> Result<Self> {
        Self::new(&app_config.user_agent, app_config.request_timeout())
    }
}

#[async_trait]
impl GraphqlTransport for HttpGraphqlTransport {
    async fn request(
        &self,
        endpoint: &str,
        headers: &Headers,
        query: &str,
        variables: Value,
    ) -> Result<Value> {
        debug!("GraphQL request to {}", endpoint);

        let request = headers.iter().fold(
            self.client.post(endpoint),
            |builder, (name, value)| builder.header(name.as_str(), value.as_str()),
        );
        let response = request
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("GraphQL endpoint {} answered {}", endpoint, status);
            return Err(ReportError::Http {
                status,
                body: error_message(&body),
            });
        }

        parse_response(&body)
    }
}

fn should_disable_system_proxy() -> bool {
    if std::env::var_os(DISABLE_SYSTEM_PROXY_ENV).is_some() {
        return true;
    }

    cfg!(test)
}

/// Unwraps a GraphQL response body into its `data` member.
pub fn parse_response(body: &str) -> Result<Value> {
    let response: GraphqlResponse = serde_json::from_str(body)
        .map_err(|e| ReportError::Graphql(format!("malformed response: {}", e)))?;

    if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
        let messages = errors
            .into_iter()
            .map(|entry| entry.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ReportError::Graphql(messages));
    }

    response
        .data
        .ok_or_else(|| ReportError::Graphql("response has no data".to_string()))
}

fn error_message(body: &str) -> String {
    match try_parse_json(body) {
        Value::String(text) => text,
        parsed => parsed
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| parsed.to_string()),
    }
}
