//! Reading signatures, credentials and plain values from HTTP headers.

use crate::core::strings::{base64_decode, base64_encode};
use crate::domain::model::BasicCredentials;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use tracing::debug;

pub const DEFAULT_SIGNATURE_HEADER: &str = "x-hub-signature";

/// Value of the signature header, `""` when it is missing or not text.
pub fn get_signature(headers: &HeaderMap, header_name: Option<&str>) -> String {
    let name = header_name.unwrap_or(DEFAULT_SIGNATURE_HEADER);
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_default()
}

/// Decodes a `Basic` authorization header. Anything else, including a
/// payload without `:`, yields empty credentials.
pub fn get_basic_auth(headers: &HeaderMap) -> BasicCredentials {
    let Some(header) = headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()) else {
        return BasicCredentials::default();
    };

    let mut parts = header.split_whitespace();
    let (Some(scheme), Some(token)) = (parts.next(), parts.last()) else {
        return BasicCredentials::default();
    };
    if !scheme.eq_ignore_ascii_case("basic") {
        return BasicCredentials::default();
    }

    match base64_decode(token) {
        Ok(decoded) => match decoded.split_once(':') {
            Some((user, pass)) => BasicCredentials {
                user: user.to_string(),
                pass: pass.to_string(),
            },
            None => BasicCredentials::default(),
        },
        Err(e) => {
            debug!("Ignoring malformed basic credentials: {}", e);
            BasicCredentials::default()
        }
    }
}

/// Header value when present and not blank.
pub fn get_header_value(headers: &HeaderMap, header_name: &str) -> Option<String> {
    headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

/// `Basic base64(user:pass)`.
pub fn basic_auth_value(user: &str, pass: &str) -> String {
    format!("Basic {}", base64_encode(&format!("{}:{}", user, pass)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_get_signature() {
        let mut headers = HeaderMap::new();
        assert_eq!(get_signature(&headers, None), "");

        headers.insert("x-hub-signature", HeaderValue::from_static("abc"));
        headers.insert("x-custom", HeaderValue::from_static("def"));
        assert_eq!(get_signature(&headers, None), "abc");
        assert_eq!(get_signature(&headers, Some("X-CUSTOM")), "def");
    }

    #[test]
    fn test_get_basic_auth() {
        let mut headers = HeaderMap::new();
        assert!(get_basic_auth(&headers).is_empty());

        let value = basic_auth_value("user", "pa:ss");
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
        let credentials = get_basic_auth(&headers);
        assert_eq!(credentials.user, "user");
        assert_eq!(credentials.pass, "pa:ss");
    }

    #[test]
    fn test_get_basic_auth_rejects_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer dXNlcjpwYXNz"));
        assert!(get_basic_auth(&headers).is_empty());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic bm9jb2xvbg=="));
        assert!(get_basic_auth(&headers).is_empty());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic %%%"));
        assert!(get_basic_auth(&headers).is_empty());
    }

    #[test]
    fn test_get_header_value() {
        let mut headers = HeaderMap::new();
        headers.insert("idempotency-key", HeaderValue::from_static("key-1"));
        headers.insert("x-blank", HeaderValue::from_static("  "));

        assert_eq!(get_header_value(&headers, "Idempotency-Key").as_deref(), Some("key-1"));
        assert_eq!(get_header_value(&headers, "x-blank"), None);
        assert_eq!(get_header_value(&headers, "x-missing"), None);
    }

    #[test]
    fn test_basic_auth_value() {
        assert_eq!(basic_auth_value("user", "pass"), "Basic dXNlcjpwYXNz");
    }
}
