//! Run configuration loading
//!
//! The TOML file provides the base configuration; flags and environment
//! variables override individual connection settings.

use crate::prelude::*;
use jira_ingest_core::config::RunConfig;
use std::path::{Path, PathBuf};

/// Where to read the run configuration from
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigOptions {
    /// Path to the TOML run configuration
    #[arg(short, long, env = "JIRA_INGEST_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Jira base URI (e.g. https://example.atlassian.net)
    #[arg(long, env = "JIRA_URI", global = true)]
    pub uri: Option<String>,

    /// Username or email used for Basic Auth
    #[arg(long, env = "JIRA_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password or API token used for Basic Auth
    #[arg(long, env = "JIRA_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// JQL filter applied to the search
    #[arg(long, env = "JIRA_JQL", global = true)]
    pub jql: Option<String>,
}

impl ConfigOptions {
    /// Load the file (if any) and apply overrides
    pub fn load(&self) -> Result<RunConfig> {
        let config = match &self.config {
            Some(path) => read_config_file(path)?,
            None => RunConfig::default(),
        };

        Ok(self.apply_overrides(config))
    }

    /// Apply flag and environment overrides to the configuration
    pub fn apply_overrides(&self, mut config: RunConfig) -> RunConfig {
        if let Some(uri) = &self.uri {
            config.uri = uri.clone();
        }
        if let Some(username) = &self.username {
            config.username = username.clone();
        }
        if let Some(password) = &self.password {
            config.password = password.clone();
        }
        if let Some(jql) = &self.jql {
            config.jql = Some(jql.clone());
        }
        config
    }
}

/// Read a run configuration file
pub fn read_config_file(path: &Path) -> Result<RunConfig> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| f!("Failed to read config file {}", path.display()))?;

    toml::from_str(&text).wrap_err_with(|| f!("Failed to parse config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jira_ingest_core::schema::ColumnType;
    use std::io::Write;

    const CONFIG: &str = r#"
uri = "https://example.atlassian.net"
username = "user@example.com"
password = "from-file"
jql = "project = PROJ"
retry_limit = 5
max_results = 25

[[columns]]
name = "key"
type = "string"

[[columns]]
name = "created"
type = "timestamp"
format = "%Y-%m-%dT%H:%M:%S.%L%z"
"#;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_config_file() {
        let file = write_config(CONFIG);

        let config = read_config_file(file.path()).unwrap();

        assert_eq!(config.uri, "https://example.atlassian.net");
        assert_eq!(config.jql.as_deref(), Some("project = PROJ"));
        assert_eq!(config.retry_limit, 5);
        assert_eq!(config.initial_retry_interval_millis, 1000);
        assert_eq!(config.max_results, 25);
        assert_eq!(config.columns.len(), 2);
        assert_eq!(config.columns[1].column_type, ColumnType::Timestamp);
        assert_eq!(config.columns[1].format(), Some("%Y-%m-%dT%H:%M:%S.%L%z"));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = write_config(CONFIG);
        let options = ConfigOptions {
            config: Some(file.path().to_path_buf()),
            password: Some("from-env".to_string()),
            jql: Some("project = OTHER".to_string()),
            ..ConfigOptions::default()
        };

        let config = options.load().unwrap();

        assert_eq!(config.password, "from-env");
        assert_eq!(config.jql.as_deref(), Some("project = OTHER"));
        assert_eq!(config.username, "user@example.com");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let options = ConfigOptions {
            uri: Some("https://host".to_string()),
            ..ConfigOptions::default()
        };

        let config = options.load().unwrap();

        assert_eq!(config.uri, "https://host");
        assert!(config.username.is_empty());
        assert!(config.columns.is_empty());
    }

    #[test]
    fn test_invalid_column_type_is_reported() {
        let file = write_config(
            r#"
[[columns]]
name = "key"
type = "decimal"
"#,
        );

        let err = read_config_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = read_config_file(Path::new("/nonexistent/jira-ingest.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
