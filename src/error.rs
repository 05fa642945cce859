use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    /// User-facing problem with the supplied runtime; never retried.
    #[error("{0}")]
    Validation(String),

    #[error("CF_API_KEY is required to authenticate the image report")]
    MissingCredential,

    #[error("CF_HOST is required when CF_RUNTIME_NAME is not set")]
    MissingHost,

    #[error("invalid semantic version '{version}': {source}")]
    InvalidVersion {
        version: String,
        #[source]
        source: semver::Error,
    },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("graphql endpoint returned {status}: {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("graphql request failed: {0}")]
    Graphql(String),

    #[error("invalid image report request: {0}")]
    InvalidRequest(String),
}

impl ReportError {
    pub fn validation(message: impl Into<String>) -> Self {
        ReportError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ReportError::Validation(_))
    }
}
