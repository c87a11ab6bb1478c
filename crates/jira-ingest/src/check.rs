//! Validate a run configuration against the live endpoint

use crate::client::{validate_config, JiraSession};
use crate::prelude::{println, *};
use colored::Colorize;
use jira_ingest_core::config::RunConfig;
use jira_ingest_core::pagination::total_pages;
use jira_ingest_core::schema::Schema;

/// Options for the check command
#[derive(Debug, clap::Args, Clone)]
pub struct CheckOptions {
    /// Also count the issues matching the configured JQL
    #[arg(long)]
    pub count: bool,
}

/// Result of a successful check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutput {
    pub columns: usize,
    pub total: Option<u64>,
    pub pages: Option<u64>,
}

/// Public data function - validates the configuration and credentials
pub async fn check_data(config: &RunConfig, count: bool) -> Result<CheckOutput> {
    validate_config(config).await.map_err(Error::from)?;

    let session = JiraSession::new(config)?;
    session.check_permission().await?;

    let schema = Schema::from_configs(&config.columns);

    let (total, pages) = if count {
        let total = session.total_count(config.jql.as_deref()).await?;
        (Some(total), Some(total_pages(total, config.max_results)))
    } else {
        (None, None)
    };

    Ok(CheckOutput {
        columns: schema.len(),
        total,
        pages,
    })
}

/// Handle the check command
pub async fn handler(options: CheckOptions, config: RunConfig) -> Result<()> {
    let output = check_data(&config, options.count).await?;

    println!("{} {}", "✓".green().bold(), "Configuration is valid".bright_white());
    println!("  Endpoint: {}", config.uri.cyan());
    println!("  Columns:  {}", output.columns);

    if let (Some(total), Some(pages)) = (output.total, output.pages) {
        println!(
            "  Matching: {} issue(s), {} page(s) of {}",
            total, pages, config.max_results
        );
    }

    Ok(())
}
