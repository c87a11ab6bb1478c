use jira_ingest_core::config::ConfigError;
use jira_ingest_core::url::UrlError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Url(#[from] UrlError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Jira API error [{status}]: {body}")]
    Api { status: u16, body: String },
}
