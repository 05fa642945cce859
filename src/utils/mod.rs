pub mod encoding;
pub mod http;
pub mod info;
pub mod json;
pub mod timer;
pub mod version;

pub use json::try_parse_json;
pub use timer::HeartbeatTimer;
pub use version::is_at_least;
