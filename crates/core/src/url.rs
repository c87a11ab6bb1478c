//! Endpoint URL construction
//!
//! Builds the permission-check and search endpoint URLs from the configured
//! base URI. The base may or may not carry a trailing slash; path components
//! that are already percent-escaped are passed through untouched.

/// Path of the endpoint used to verify the configured credentials
pub const PERMISSION_PATH: &str = "rest/api/latest/myself";

/// Path of the issue search endpoint
pub const SEARCH_PATH: &str = "rest/api/latest/search";

/// Error returned when the base URI cannot be used to build an endpoint URL
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Malformed base URI: {0}")]
    Malformed(String),
}

/// Build the permission-check URL for `base`
pub fn build_permission_url(base: &str) -> Result<String, UrlError> {
    append_path(base, PERMISSION_PATH)
}

/// Build the issue search URL for `base`
pub fn build_search_url(base: &str) -> Result<String, UrlError> {
    append_path(base, SEARCH_PATH)
}

/// Append `suffix` as a path segment of `base`.
///
/// Query strings and fragments on `base` are kept after the new path.
fn append_path(base: &str, suffix: &str) -> Result<String, UrlError> {
    let malformed =
        |reason: &dyn std::fmt::Display| UrlError::Malformed(format!("{base}: {reason}"));

    let mut url = ::url::Url::parse(base.trim()).map_err(|e| malformed(&e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(malformed(&"scheme must be http or https"));
    }

    let path = format!(
        "{}/{}",
        url.path().trim_end_matches('/'),
        suffix.trim_start_matches('/')
    );
    url.set_path(&path);

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_search_url_without_trailing_slash() {
        let url = build_search_url("https://example.atlassian.net").unwrap();
        assert_eq!(url, "https://example.atlassian.net/rest/api/latest/search");
    }

    #[test]
    fn test_build_permission_url_with_trailing_slash() {
        let url = build_permission_url("https://example.atlassian.net/").unwrap();
        assert_eq!(url, "https://example.atlassian.net/rest/api/latest/myself");
    }

    #[test]
    fn test_build_url_keeps_context_path() {
        let url = build_search_url("http://localhost:8080/jira//").unwrap();
        assert_eq!(url, "http://localhost:8080/jira/rest/api/latest/search");
    }

    #[test]
    fn test_build_url_does_not_double_encode() {
        let url = build_search_url("https://host/my%20jira").unwrap();
        assert_eq!(url, "https://host/my%20jira/rest/api/latest/search");
    }

    #[test]
    fn test_build_url_keeps_query_after_path() {
        let url = build_permission_url("https://host/jira?x=1").unwrap();
        assert_eq!(url, "https://host/jira/rest/api/latest/myself?x=1");
    }

    #[test]
    fn test_build_url_equals_base_plus_suffix() {
        for base in ["https://a.example", "http://127.0.0.1:9000", "https://h/ctx"] {
            assert_eq!(
                build_search_url(base).unwrap(),
                format!("{base}/{SEARCH_PATH}")
            );
            assert_eq!(
                build_permission_url(base).unwrap(),
                format!("{base}/{PERMISSION_PATH}")
            );
        }
    }

    #[test]
    fn test_build_url_rejects_malformed_base() {
        assert!(matches!(
            build_search_url("not a url"),
            Err(UrlError::Malformed(_))
        ));
        assert!(build_search_url("ftp://host").is_err());
        assert!(build_search_url("https://").is_err());
        assert!(build_search_url("https://ho st").is_err());
    }

    #[test]
    fn test_build_url_rejects_invalid_authority() {
        for base in [
            "http://host:notaport",
            "https://[::1",
            "http://ho<st>",
            "https://host:99999",
        ] {
            assert!(
                matches!(build_search_url(base), Err(UrlError::Malformed(_))),
                "{base}"
            );
            assert!(build_permission_url(base).is_err(), "{base}");
        }
    }
}
