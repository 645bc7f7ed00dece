use tracing::warn;
use url::{ParseError, Url};

/// Sets `parameter` in the query string of `uri`.
///
/// The first parameter matching `parameter` (ignoring case) takes the new
/// value and later duplicates are dropped; `None` removes it. Blank `uri` or
/// `parameter`, and input that can't be parsed, come back unchanged.
/// Scheme-less input is read as `http`. Default ports are omitted.
pub fn add_query_string(uri: &str, parameter: &str, value: Option<&str>) -> String {
    if uri.trim().is_empty() || parameter.trim().is_empty() {
        return uri.to_string();
    }

    let mut url = match parse_lenient(uri.trim()) {
        Ok(url) => url,
        Err(e) => {
            warn!("Unable to add `{}` to `{}`: {}", parameter, uri, e);
            return uri.to_string();
        }
    };

    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let mut replaced = false;
    pairs.retain_mut(|(name, current)| {
        if !name.eq_ignore_ascii_case(parameter) {
            return true;
        }
        match value {
            Some(value) if !replaced => {
                *current = value.to_string();
                replaced = true;
                true
            }
            _ => false,
        }
    });

    if let (false, Some(value)) = (replaced, value) {
        pairs.push((parameter.to_string(), value.to_string()));
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs.iter());
    }

    url.to_string()
}

fn parse_lenient(uri: &str) -> Result<Url, ParseError> {
    match Url::parse(uri) {
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("http://{}", uri)),
        parsed => parsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_parameter_or_uri_is_unchanged() {
        assert_eq!(add_query_string("http://www.test.com/", "", None), "http://www.test.com/");
        assert_eq!(add_query_string("", "param", Some("value")), "");
    }

    #[test]
    fn test_first_parameter() {
        assert_eq!(
            add_query_string("http://www.google.com/", "param", Some("value")),
            "http://www.google.com/?param=value"
        );
    }

    #[test]
    fn test_second_parameter() {
        assert_eq!(
            add_query_string("http://www.google.com/?param1=value1", "param2", Some("value2")),
            "http://www.google.com/?param1=value1&param2=value2"
        );
    }

    #[test]
    fn test_updated_parameter() {
        assert_eq!(
            add_query_string("http://www.google.com/?param=wrong-value", "param", Some("value")),
            "http://www.google.com/?param=value"
        );
        assert_eq!(
            add_query_string("http://www.google.com/?PARAM=a&x=1&param=b", "param", Some("c")),
            "http://www.google.com/?PARAM=c&x=1"
        );
    }

    #[test]
    fn test_https_and_ports() {
        assert_eq!(
            add_query_string("https://www.google.com/", "param", Some("value")),
            "https://www.google.com/?param=value"
        );
        assert_eq!(
            add_query_string("https://www.google.com:505/", "param", Some("value")),
            "https://www.google.com:505/?param=value"
        );
        assert_eq!(
            add_query_string("https://www.google.com:443/", "param", Some("value")),
            "https://www.google.com/?param=value"
        );
    }

    #[test]
    fn test_remove_parameter() {
        assert_eq!(
            add_query_string("http://www.google.com/?param=value", "param", None),
            "http://www.google.com/"
        );
    }

    #[test]
    fn test_scheme_less_and_invalid_input() {
        assert_eq!(
            add_query_string("www.google.com", "param", Some("value")),
            "http://www.google.com/?param=value"
        );
        assert_eq!(add_query_string("http://[::1", "param", Some("value")), "http://[::1");
    }
}
