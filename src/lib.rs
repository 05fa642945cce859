//! Builds the image-report request a CI step sends to the Codefresh platform
//! after an image is built.
//!
//! The request is shaped from `CF_*` parameters: the target host comes either
//! from `CF_HOST` or from the ingress host of the runtime named by
//! `CF_RUNTIME_NAME`, and newer runtimes receive the report fields in a base64
//! header instead of the query string.

pub mod config;
pub mod domain;
pub mod error;
pub mod graphql;
pub mod report;
pub mod runtime;
pub mod utils;

use config::AppConfig;
use domain::{ImageReportRequest, Payload};
use graphql::GraphqlTransport;
use report::ImageReportBuilder;

pub use error::{ReportError, Result};

/// Builds the image-report URL and headers with the default platform
/// settings.
pub async fn build_url_headers(
    transport: &dyn GraphqlTransport,
    payload: &Payload,
) -> Result<ImageReportRequest> {
    let app_config = AppConfig::default();
    ImageReportBuilder::new(transport, &app_config)
        .build_url_headers(payload)
        .await
}
