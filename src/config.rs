use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

pub const DEFAULT_PLATFORM_URL: &str = "https://g.codefresh.io";
pub const GRAPHQL_PATH: &str = "/2.0/api/graphql";
pub const HEADER_ENCODING_MIN_VERSION: &str = "0.0.553";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub platform_url: String,
    pub graphql_path: String,
    pub header_encoding_min_version: String,
    pub request_timeout_secs: u64,
    pub heartbeat_secs: u64,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            platform_url: DEFAULT_PLATFORM_URL.to_string(),
            graphql_path: GRAPHQL_PATH.to_string(),
            header_encoding_min_version: HEADER_ENCODING_MIN_VERSION.to_string(),
            request_timeout_secs: 30,
            heartbeat_secs: 10,
            user_agent: default_user_agent(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();
        let mut s = Config::builder()
            .set_default("platform_url", defaults.platform_url)?
            .set_default("graphql_path", defaults.graphql_path)?
            .set_default(
                "header_encoding_min_version",
                defaults.header_encoding_min_version,
            )?
            .set_default("request_timeout_secs", defaults.request_timeout_secs)?
            .set_default("heartbeat_secs", defaults.heartbeat_secs)?
            .set_default("user_agent", defaults.user_agent)?
            .add_source(File::with_name("config/default").required(false));

        if let Ok(env) = env::var("CF_REPORT_ENV") {
            s = s.add_source(File::with_name(&format!("config/{}", env)).required(false));
        }

        s.add_source(config::Environment::with_prefix("CF_REPORT").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// GraphQL endpoint for `platform_host`, falling back to the configured
    /// platform when none is given.
    pub fn graphql_endpoint(&self, platform_host: Option<&str>) -> String {
        let host = platform_host
            .filter(|host| !host.is_empty())
            .unwrap_or(&self.platform_url);
        format!("{}{}", host, self.graphql_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_secs)
    }
}

fn default_user_agent() -> String {
    format!("cf-image-report/{}", env!("CARGO_PKG_VERSION"))
}
