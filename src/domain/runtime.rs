use serde::Deserialize;

/// The two runtime fields the platform is queried for. Either may be missing
/// or null in a response.
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeDescriptor {
    #[serde(default)]
    pub ingress_host: Option<String>,
    #[serde(default)]
    pub runtime_version: Option<String>,
}

/// `data` member of a `runtime(name: $name)` query.
#[derive(Debug, Default, Deserialize)]
pub struct RuntimeQueryData {
    #[serde(default)]
    pub runtime: Option<RuntimeDescriptor>,
}
