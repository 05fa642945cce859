use indexmap::IndexMap;

pub const CF_API_KEY: &str = "CF_API_KEY";
pub const CF_HOST: &str = "CF_HOST";
pub const CF_RUNTIME_NAME: &str = "CF_RUNTIME_NAME";
pub const CF_PLATFORM_URL: &str = "CF_PLATFORM_URL";
pub const CF_DOCKERFILE_CONTENT: &str = "CF_DOCKERFILE_CONTENT";
pub const CF_LOCAL: &str = "CF_LOCAL";

/// Report parameters in insertion order. `None` values serialize as empty
/// strings.
pub type Payload = IndexMap<String, Option<String>>;

/// Looks up `key`, treating an absent, null or empty value alike.
pub fn non_empty<'a>(payload: &'a Payload, key: &str) -> Option<&'a str> {
    payload
        .get(key)
        .and_then(|value| value.as_deref())
        .filter(|value| !value.is_empty())
}

/// View over a borrowed payload that tracks which control keys have been
/// consumed, leaving the caller's map untouched.
#[derive(Debug)]
pub struct RemainingFields<'a> {
    payload: &'a Payload,
    consumed: Vec<&'static str>,
}

impl<'a> RemainingFields<'a> {
    pub fn new(payload: &'a Payload) -> Self {
        Self {
            payload,
            consumed: Vec::new(),
        }
    }

    pub fn consume(&mut self, key: &'static str) {
        if !self.consumed.contains(&key) {
            self.consumed.push(key);
        }
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        if self.is_consumed(key) {
            return None;
        }
        non_empty(self.payload, key)
    }

    /// Remaining entries in payload order, with absent values as `""`.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.payload
            .iter()
            .filter(|(key, _)| !self.is_consumed(key))
            .map(|(key, value)| (key.as_str(), value.as_deref().unwrap_or("")))
    }

    fn is_consumed(&self, key: &str) -> bool {
        self.consumed.iter().any(|consumed| *consumed == key)
    }
}
