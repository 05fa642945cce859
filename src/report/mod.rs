use tracing::{debug, info};

use crate::config::AppConfig;
use crate::domain::{
    AUTHORIZATION, CF_API_KEY, CF_DOCKERFILE_CONTENT, CF_HOST, CF_LOCAL, CF_PLATFORM_URL,
    CF_RUNTIME_NAME, Headers, ImageReportRequest, Payload, PayloadEncoding, RemainingFields,
    X_CF_DATA, X_CF_DOCKERFILE_CONTENT, non_empty,
};
use crate::error::{ReportError, Result};
use crate::graphql::GraphqlTransport;
use crate::runtime::RuntimeResolver;
use crate::utils::encoding::{encode_header_data, encode_query};
use crate::utils::http::redacted_headers;
use crate::utils::version::is_at_least;

const APP_PROXY_REPORT_PATH: &str = "/app-proxy/api/image-report";
const LOCAL_REPORT_PATH: &str = "/api/image-report";

/// Shapes the image-report request from a payload of `CF_*` parameters.
pub struct ImageReportBuilder<'a> {
    resolver: RuntimeResolver<'a>,
    app_config: &'a AppConfig,
}

impl<'a> ImageReportBuilder<'a> {
    pub fn new(transport: &'a dyn GraphqlTransport, app_config: &'a AppConfig) -> Self {
        Self {
            resolver: RuntimeResolver::new(transport, app_config),
            app_config,
        }
    }

    /// Builds the image-report URL and headers.
    ///
    /// With `CF_RUNTIME_NAME` the host is the runtime's ingress host and the
    /// runtime version picks the encoding; otherwise `CF_HOST` is used with
    /// the legacy query string. The payload itself is never modified.
    pub async fn build_url_headers(&self, payload: &Payload) -> Result<ImageReportRequest> {
        let api_key = non_empty(payload, CF_API_KEY).ok_or(ReportError::MissingCredential)?;
        let mut headers = Headers::new();
        headers.insert(AUTHORIZATION.to_string(), api_key.to_string());

        let runtime_name = non_empty(payload, CF_RUNTIME_NAME);
        let platform_host = non_empty(payload, CF_PLATFORM_URL);
        let mut fields = RemainingFields::new(payload);

        let (runtime_version, host) = match runtime_name {
            None => {
                let runtime_version = self
                    .resolver
                    .get_runtime_version(&headers, None, platform_host)
                    .await?;
                let host = non_empty(payload, CF_HOST).ok_or(ReportError::MissingHost)?;
                fields.consume(CF_HOST);
                (runtime_version, host.to_string())
            }
            Some(runtime_name) => {
                // Independent lookups, so they run side by side.
                let resolved = futures::try_join!(
                    self.resolver
                        .get_runtime_version(&headers, Some(runtime_name), platform_host),
                    self.resolver
                        .get_runtime_ingress_host(runtime_name, &headers, platform_host),
                )?;
                fields.consume(CF_RUNTIME_NAME);
                fields.consume(CF_PLATFORM_URL);
                resolved
            }
        };
        fields.consume(CF_API_KEY);

        let encoding = if is_at_least(
            &runtime_version,
            &self.app_config.header_encoding_min_version,
        )? {
            PayloadEncoding::Header
        } else {
            PayloadEncoding::Legacy
        };
        info!(
            "Image report target {} (runtime version '{}', {:?} encoding)",
            host, runtime_version, encoding
        );

        let url = match encoding {
            PayloadEncoding::Header => {
                if let Some(dockerfile) = fields.get(CF_DOCKERFILE_CONTENT) {
                    headers.insert(X_CF_DOCKERFILE_CONTENT.to_string(), dockerfile.to_string());
                    fields.consume(CF_DOCKERFILE_CONTENT);
                }
                headers.insert(X_CF_DATA.to_string(), encode_header_data(fields.iter()));
                format!("{}{}", host, APP_PROXY_REPORT_PATH)
            }
            PayloadEncoding::Legacy => {
                let qs = encode_query(fields.iter());
                let path = if fields.get(CF_LOCAL).is_some() {
                    LOCAL_REPORT_PATH
                } else {
                    APP_PROXY_REPORT_PATH
                };
                format!("{}{}?{}", host, path, qs)
            }
        };
        debug!("Image report headers: {:?}", redacted_headers(&headers));

        Ok(ImageReportRequest { url, headers })
    }
}
