use indexmap::IndexMap;
use serde::Serialize;

pub const AUTHORIZATION: &str = "authorization";
pub const X_CF_DOCKERFILE_CONTENT: &str = "X-CF-DOCKERFILE-CONTENT";
pub const X_CF_DATA: &str = "X-CF-DATA";

/// Header name to value, in the order headers were added.
pub type Headers = IndexMap<String, String>;

/// The image-report call a caller is expected to dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReportRequest {
    pub url: String,
    pub headers: Headers,
}

/// How the remaining payload fields travel to the image-report endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadEncoding {
    /// Base64 `X-CF-DATA` header, bare URL.
    Header,
    /// Percent-encoded query string on the URL.
    Legacy,
}
