use serde_json::json;
use tracing::debug;

use crate::config::AppConfig;
use crate::domain::{Headers, RuntimeDescriptor, RuntimeQueryData};
use crate::error::{ReportError, Result};
use crate::graphql::{GraphqlTransport, RUNTIME_INGRESS_HOST_QUERY, RUNTIME_VERSION_QUERY};

/// Read-only runtime lookups against the platform's GraphQL API.
///
/// Every call is one round-trip; nothing is cached or retried.
pub struct RuntimeResolver<'a> {
    transport: &'a dyn GraphqlTransport,
    app_config: &'a AppConfig,
}

impl<'a> RuntimeResolver<'a> {
    pub fn new(transport: &'a dyn GraphqlTransport, app_config: &'a AppConfig) -> Self {
        Self {
            transport,
            app_config,
        }
    }

    /// Version of `runtime_name`, or `""` when no runtime is named or the
    /// runtime reports no version yet. Skips the network without a name.
    pub async fn get_runtime_version(
        &self,
        headers: &Headers,
        runtime_name: Option<&str>,
        platform_host: Option<&str>,
    ) -> Result<String> {
        let Some(runtime_name) = runtime_name.filter(|name| !name.is_empty()) else {
            return Ok(String::new());
        };

        let runtime = self
            .query_runtime(RUNTIME_VERSION_QUERY, runtime_name, headers, platform_host)
            .await?;
        let version = runtime
            .and_then(|runtime| runtime.runtime_version)
            .unwrap_or_default();
        debug!("Runtime '{}' version: '{}'", runtime_name, version);
        Ok(version)
    }

    pub async fn get_runtime_ingress_host(
        &self,
        runtime_name: &str,
        headers: &Headers,
        platform_host: Option<&str>,
    ) -> Result<String> {
        let runtime = self
            .query_runtime(RUNTIME_INGRESS_HOST_QUERY, runtime_name, headers, platform_host)
            .await?;

        match runtime {
            None => Err(ReportError::validation(format!(
                "runtime '{}' does not exist",
                runtime_name
            ))),
            Some(RuntimeDescriptor {
                ingress_host: Some(host),
                ..
            }) if !host.is_empty() => {
                debug!("Runtime '{}' ingress host: {}", runtime_name, host);
                Ok(host)
            }
            Some(_) => Err(ReportError::validation(format!(
                "ingress host is not defined on your '{}' runtime",
                runtime_name
            ))),
        }
    }

    async fn query_runtime(
        &self,
        query: &str,
        runtime_name: &str,
        headers: &Headers,
        platform_host: Option<&str>,
    ) -> Result<Option<RuntimeDescriptor>> {
        let endpoint = self.app_config.graphql_endpoint(platform_host);
        let data = self
            .transport
            .request(&endpoint, headers, query, json!({ "name": runtime_name }))
            .await?;
        let data: RuntimeQueryData = serde_json::from_value(data)
            .map_err(|e| ReportError::Graphql(format!("unexpected runtime shape: {}", e)))?;
        Ok(data.runtime)
    }
}
