//! Run configuration and validation checks
//!
//! The configuration is validated once, before any fetching starts. The
//! credential and retry checks live here as pure functions; the connectivity
//! check that sits between them needs the network and is done by the shell.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::schema::ColumnConfig;

/// Timeout applied to connect, read and the whole request of the reachability check
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(300);

/// Default number of issues requested per search page
pub const DEFAULT_MAX_RESULTS: u64 = 50;

/// Largest accepted retry limit
pub const MAX_RETRY_LIMIT: i64 = 10;

/// Errors reported by configuration validation
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Username or email could not be empty")]
    UsernameEmpty,

    #[error("Password could not be empty")]
    PasswordEmpty,

    #[error("JIRA API endpoint could not be empty")]
    UriEmpty,

    #[error("JIRA API endpoint is incorrect or not available")]
    EndpointUnreachable,

    #[error("Initial retry delay should be equal or greater than 1")]
    RetryIntervalTooSmall,

    #[error("Retry limit should between 0 and 10")]
    RetryLimitOutOfRange,

    #[error("Page size should be greater than 0")]
    PageSizeZero,
}

/// Connection parameters and output schema for one ingestion run
#[derive(Clone, Deserialize, Serialize, PartialEq)]
pub struct RunConfig {
    #[serde(default)]
    pub uri: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// JQL filter, empty means every issue visible to the user
    #[serde(default)]
    pub jql: Option<String>,

    #[serde(default = "default_retry_limit")]
    pub retry_limit: i64,

    #[serde(default = "default_initial_retry_interval_millis")]
    pub initial_retry_interval_millis: i64,

    #[serde(default = "default_max_results")]
    pub max_results: u64,

    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
}

fn default_retry_limit() -> i64 {
    3
}

fn default_initial_retry_interval_millis() -> i64 {
    1000
}

fn default_max_results() -> u64 {
    DEFAULT_MAX_RESULTS
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            uri: String::new(),
            username: String::new(),
            password: String::new(),
            jql: None,
            retry_limit: default_retry_limit(),
            initial_retry_interval_millis: default_initial_retry_interval_millis(),
            max_results: default_max_results(),
            columns: Vec::new(),
        }
    }
}

impl std::fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunConfig")
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("jql", &self.jql)
            .field("retry_limit", &self.retry_limit)
            .field(
                "initial_retry_interval_millis",
                &self.initial_retry_interval_millis,
            )
            .field("max_results", &self.max_results)
            .field("columns", &self.columns)
            .finish()
    }
}

/// Check that username, password and URI are present, in that order
pub fn check_credentials(config: &RunConfig) -> Result<(), ConfigError> {
    if config.username.is_empty() {
        return Err(ConfigError::UsernameEmpty);
    }
    if config.password.is_empty() {
        return Err(ConfigError::PasswordEmpty);
    }
    if config.uri.is_empty() {
        return Err(ConfigError::UriEmpty);
    }
    Ok(())
}

/// Check the retry interval and retry limit bounds, in that order
pub fn check_retry_policy(config: &RunConfig) -> Result<(), ConfigError> {
    if config.initial_retry_interval_millis < 1 {
        return Err(ConfigError::RetryIntervalTooSmall);
    }
    if !(0..=MAX_RETRY_LIMIT).contains(&config.retry_limit) {
        return Err(ConfigError::RetryLimitOutOfRange);
    }
    Ok(())
}

/// Check that the page size can drive pagination
pub fn check_page_size(config: &RunConfig) -> Result<(), ConfigError> {
    if config.max_results == 0 {
        return Err(ConfigError::PageSizeZero);
    }
    Ok(())
}
