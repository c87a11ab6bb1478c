//! HTTP access to the Jira REST API

use crate::prelude::*;
use jira_ingest_core::config::{
    check_credentials, check_page_size, check_retry_policy, ConfigError, RunConfig, HTTP_TIMEOUT,
};
use jira_ingest_core::issue::SearchResponse;
use jira_ingest_core::url::{build_permission_url, build_search_url};
use std::time::Duration;

/// Validate `config` before any fetching starts.
///
/// Checks credentials, checks the endpoint is reachable, then checks the retry policy and
/// page size, stopping at the first failure.
pub async fn validate_config(config: &RunConfig) -> std::result::Result<(), ConfigError> {
    validate_config_with_timeout(config, HTTP_TIMEOUT).await
}

/// [`validate_config`] with an explicit reachability timeout
pub async fn validate_config_with_timeout(
    config: &RunConfig,
    timeout: Duration,
) -> std::result::Result<(), ConfigError> {
    check_credentials(config)?;

    match ping_endpoint(&config.uri, timeout).await {
        Ok(status) => log::debug!("endpoint {} answered with {}", config.uri, status),
        Err(e) => {
            log::debug!("endpoint unreachable: {e}");
            return Err(ConfigError::EndpointUnreachable);
        }
    }

    check_retry_policy(config)?;
    check_page_size(config)
}

/// Issue one unauthenticated GET against `uri`.
///
/// Connect, read and the overall request share the same `timeout`. The
/// status code is returned but any response counts as reachable.
pub async fn ping_endpoint(uri: &str, timeout: Duration) -> std::result::Result<u16, reqwest::Error> {
    let client = reqwest::Client::builder()
        .connect_timeout(timeout)
        .read_timeout(timeout)
        .timeout(timeout)
        .build()?;

    let response = client.get(uri).send().await?;
    Ok(response.status().as_u16())
}

/// Create an authenticated HTTP client with Basic Auth headers
pub fn create_authenticated_client(config: &RunConfig) -> Result<reqwest::Client> {
    use base64::Engine;
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

    let auth_string = format!("{}:{}", config.username, config.password);
    let auth_encoded = base64::engine::general_purpose::STANDARD.encode(&auth_string);

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Basic {auth_encoded}"))
            .map_err(|e| eyre!("Invalid header value: {}", e))?,
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(HTTP_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Authenticated session against one Jira instance
#[derive(Debug, Clone)]
pub struct JiraSession {
    client: reqwest::Client,
    search_url: String,
    permission_url: String,
}

impl JiraSession {
    pub fn new(config: &RunConfig) -> Result<Self> {
        Ok(Self {
            client: create_authenticated_client(config)?,
            search_url: build_search_url(&config.uri).map_err(Error::from)?,
            permission_url: build_permission_url(&config.uri).map_err(Error::from)?,
        })
    }

    /// Verify the credentials are accepted
    pub async fn check_permission(&self) -> Result<()> {
        let response = self
            .client
            .get(&self.permission_url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, body }.into());
        }

        Ok(())
    }

    /// Fetch one page of search results
    pub async fn search(
        &self,
        jql: Option<&str>,
        start_at: u64,
        max_results: u64,
    ) -> Result<SearchResponse> {
        let start_at = start_at.to_string();
        let max_results = max_results.to_string();

        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("jql", jql.unwrap_or_default()),
                ("startAt", start_at.as_str()),
                ("maxResults", max_results.as_str()),
                ("fields", "*all"),
            ])
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, body }.into());
        }

        let body_text = response
            .text()
            .await
            .map_err(|e| eyre!("Failed to read response body: {}", e))?;

        serde_json::from_str(&body_text).map_err(|e| eyre!("Failed to parse Jira response: {}", e))
    }

    /// Number of issues matching `jql`
    pub async fn total_count(&self, jql: Option<&str>) -> Result<u64> {
        Ok(self.search(jql, 0, 0).await?.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(uri: &str) -> RunConfig {
        RunConfig {
            uri: uri.to_string(),
            username: "user".to_string(),
            password: "secret".to_string(),
            ..RunConfig::default()
        }
    }

    #[tokio::test]
    async fn test_validate_config_accepts_reachable_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let result = validate_config(&config_for(&server.uri())).await;

        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_validate_config_rejects_unreachable_endpoint() {
        let result = validate_config_with_timeout(
            &config_for("http://127.0.0.1:1"),
            Duration::from_secs(5),
        )
        .await;

        assert_eq!(result, Err(ConfigError::EndpointUnreachable));
    }

    #[tokio::test]
    async fn test_validate_config_rejects_malformed_uri() {
        let result = validate_config(&config_for("::not a uri::")).await;
        assert_eq!(result, Err(ConfigError::EndpointUnreachable));
    }

    #[tokio::test]
    async fn test_validate_config_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let result =
            validate_config_with_timeout(&config_for(&server.uri()), Duration::from_millis(200))
                .await;

        assert_eq!(result, Err(ConfigError::EndpointUnreachable));
    }

    #[tokio::test]
    async fn test_validate_config_checks_credentials_before_reachability() {
        let config = RunConfig {
            username: String::new(),
            ..config_for("http://127.0.0.1:1")
        };
        assert_eq!(
            validate_config(&config).await,
            Err(ConfigError::UsernameEmpty)
        );
    }

    #[tokio::test]
    async fn test_validate_config_checks_retry_policy_after_reachability() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        for (limit, expected) in [
            (-1, Err(ConfigError::RetryLimitOutOfRange)),
            (0, Ok(())),
            (10, Ok(())),
            (11, Err(ConfigError::RetryLimitOutOfRange)),
        ] {
            let config = RunConfig {
                retry_limit: limit,
                ..config_for(&server.uri())
            };
            assert_eq!(validate_config(&config).await, expected, "limit {limit}");
        }

        let config = RunConfig {
            initial_retry_interval_millis: 0,
            ..config_for(&server.uri())
        };
        assert_eq!(
            validate_config(&config).await,
            Err(ConfigError::RetryIntervalTooSmall)
        );
    }

    #[tokio::test]
    async fn test_check_permission_sends_basic_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/latest/myself"))
            .and(header("authorization", "Basic dXNlcjpzZWNyZXQ="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "user"})))
            .expect(1)
            .mount(&server)
            .await;

        let session = JiraSession::new(&config_for(&server.uri())).unwrap();

        session.check_permission().await.unwrap();
    }

    #[tokio::test]
    async fn test_check_permission_reports_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/latest/myself"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let session = JiraSession::new(&config_for(&server.uri())).unwrap();
        let err = session.check_permission().await.unwrap_err();

        match err.downcast_ref::<Error>() {
            Some(Error::Api { status, body }) => {
                assert_eq!(*status, 401);
                assert_eq!(body, "Unauthorized");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_total_count_requests_zero_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/latest/search"))
            .and(query_param("maxResults", "0"))
            .and(query_param("jql", "project = PROJ"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "startAt": 0, "maxResults": 0, "total": 123, "issues": []
            })))
            .mount(&server)
            .await;

        let session = JiraSession::new(&config_for(&server.uri())).unwrap();

        assert_eq!(session.total_count(Some("project = PROJ")).await.unwrap(), 123);
    }

    #[test]
    fn test_built_urls_round_trip_through_parser() {
        for base in ["https://example.atlassian.net", "http://localhost:8080/jira/"] {
            for built in [
                build_search_url(base).unwrap(),
                build_permission_url(base).unwrap(),
            ] {
                let parsed = reqwest::Url::parse(&built).unwrap();
                assert_eq!(parsed.as_str(), built);
                let reparsed = reqwest::Url::parse(parsed.as_str()).unwrap();
                assert_eq!(reparsed.path(), parsed.path());
            }
        }
    }

    #[test]
    fn test_session_rejects_malformed_base_uri() {
        let err = JiraSession::new(&config_for("not a uri")).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Url(_))));
    }
}
