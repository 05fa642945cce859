use anyhow::{Context, Error};
use http_body_util::Empty;
use hyper::{Method, Request, body::Bytes};
use tracing::debug;

use crate::domain::{AUTHORIZATION, Headers, ImageReportRequest};
use crate::error::ReportError;

const REDACTED: &str = "[REDACTED]";

/// Copies `headers` with credentials masked, for logging.
pub fn redacted_headers(headers: &Headers) -> Headers {
    headers
        .iter()
        .map(|(name, value)| {
            let value = if name.eq_ignore_ascii_case(AUTHORIZATION) {
                REDACTED.to_string()
            } else {
                value.clone()
            };
            (name.clone(), value)
        })
        .collect()
}

/// Builds an unsent GET request for the image-report endpoint.
pub fn build_request(
    report: &ImageReportRequest,
    user_agent: &str,
) -> Result<Request<Empty<Bytes>>, Error> {
    debug!("Building image report request: {}", report.url);

    let request_builder = report.headers.iter().fold(
        Request::builder()
            .method(Method::GET)
            .uri(report.url.as_str())
            .header("Accept", "*/*")
            .header("User-Agent", user_agent),
        |builder, (key, value)| builder.header(key.as_str(), value.as_str()),
    );

    request_builder
        .body(Empty::<Bytes>::new())
        .with_context(|| format!("Failed to build request for {}", report.url))
}

impl ImageReportRequest {
    /// Converts the report into a hyper request. The URL must be absolute.
    pub fn to_http_request(&self, user_agent: &str) -> Result<Request<Empty<Bytes>>, ReportError> {
        let request = build_request(self, user_agent)
            .map_err(|e| ReportError::InvalidRequest(format!("{:#}", e)))?;
        if request.uri().scheme().is_none() || request.uri().host().is_none() {
            return Err(ReportError::InvalidRequest(format!(
                "'{}' is not an absolute URL",
                self.url
            )));
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(url: &str) -> ImageReportRequest {
        ImageReportRequest {
            url: url.to_string(),
            headers: Headers::from([
                ("authorization".to_string(), "the-token".to_string()),
                ("X-CF-DATA".to_string(), "Q0ZfSU1BR0U9aW1n".to_string()),
            ]),
        }
    }

    #[test]
    fn test_redacted_headers() {
        let headers = redacted_headers(&report("https://h").headers);
        assert_eq!(headers.get("authorization").unwrap(), "[REDACTED]");
        assert_eq!(headers.get("X-CF-DATA").unwrap(), "Q0ZfSU1BR0U9aW1n");
    }

    #[test]
    fn test_to_http_request() {
        let request = report("https://rt.example.com/app-proxy/api/image-report")
            .to_http_request("cf-image-report/test")
            .unwrap();
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.uri().host(), Some("rt.example.com"));
        assert_eq!(request.uri().path(), "/app-proxy/api/image-report");
        assert_eq!(request.headers()["authorization"], "the-token");
        assert_eq!(request.headers()["x-cf-data"], "Q0ZfSU1BR0U9aW1n");
        assert_eq!(request.headers()["user-agent"], "cf-image-report/test");
    }

    #[test]
    fn test_to_http_request_keeps_query() {
        let request = report("http://localhost:8080/api/image-report?CF_IMAGE=img&CF_LOCAL=true")
            .to_http_request("ua")
            .unwrap();
        assert_eq!(request.uri().query(), Some("CF_IMAGE=img&CF_LOCAL=true"));
    }

    #[test]
    fn test_to_http_request_requires_absolute_url() {
        let err = report("g.codefresh.io/app-proxy/api/image-report")
            .to_http_request("ua")
            .unwrap_err();
        assert!(matches!(err, ReportError::InvalidRequest(_)));
    }

    #[test]
    fn test_to_http_request_rejects_invalid_header() {
        let mut report = report("https://h/app-proxy/api/image-report");
        report
            .headers
            .insert("X-CF-DOCKERFILE-CONTENT".to_string(), "FROM a\nRUN b".to_string());
        assert!(report.to_http_request("ua").is_err());
    }
}
