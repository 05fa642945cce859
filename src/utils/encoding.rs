use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters `encodeURIComponent` escapes: everything except alphanumerics
/// and `-_.!~*'()`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}

/// `key=value` pairs joined with `&`, percent-encoded.
pub fn encode_query<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    fields
        .into_iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                encode_uri_component(key),
                encode_uri_component(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// `key=value` pairs joined with `&`, passed through raw and base64-encoded.
pub fn encode_header_data<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let raw = fields
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");
    STANDARD.encode(raw.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uri_component_matches_javascript() {
        assert_eq!(encode_uri_component("testImage"), "testImage");
        assert_eq!(
            encode_uri_component("repo/app:1.0 latest"),
            "repo%2Fapp%3A1.0%20latest"
        );
        assert_eq!(encode_uri_component("a&b=c?d#e"), "a%26b%3Dc%3Fd%23e");
        assert_eq!(encode_uri_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_uri_component("ü"), "%C3%BC");
        assert_eq!(encode_uri_component(""), "");
    }

    #[test]
    fn test_encode_query() {
        assert_eq!(
            encode_query([("CF_IMAGE", "repo/app:1.0"), ("CF_TAG", "")]),
            "CF_IMAGE=repo%2Fapp%3A1.0&CF_TAG="
        );
        assert_eq!(encode_query(std::iter::empty()), "");
    }

    #[test]
    fn test_encode_header_data_is_raw() {
        let data = encode_header_data([("CF_IMAGE", "repo/app:1.0"), ("CF_BRANCH", "a b")]);
        let decoded = String::from_utf8(STANDARD.decode(data).unwrap()).unwrap();
        assert_eq!(decoded, "CF_IMAGE=repo/app:1.0&CF_BRANCH=a b");
    }

    #[test]
    fn test_encode_header_data_known_value() {
        assert_eq!(encode_header_data([("a", "b")]), "YT1i");
    }

    #[test]
    fn test_encode_header_data_uses_utf8_bytes() {
        // latin1 bytes would give "YT38"
        assert_eq!(encode_header_data([("a", "ü")]), "YT3DvA==");
        assert_eq!(STANDARD.encode("ü"), "w7w=");
    }
}
