//! Suggest column declarations from a sample of live issues

use crate::client::{validate_config, JiraSession};
use crate::prelude::{eprintln, println, *};
use jira_ingest_core::config::RunConfig;
use jira_ingest_core::guess::guess_columns;
use jira_ingest_core::schema::ColumnConfig;
use serde::Serialize;

/// Options for the guess command
#[derive(Debug, clap::Args, Clone)]
#[command(after_help = "EXAMPLES:
  # Print a [[columns]] section inferred from 20 issues:
  jira-ingest guess --config jira.toml --sample 20 >> jira.toml")]
pub struct GuessOptions {
    /// Number of issues to sample
    #[arg(short, long, default_value = "50")]
    pub sample: u64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Guessed columns, serialized as a config file fragment
#[derive(Debug, Serialize, PartialEq)]
pub struct GuessOutput {
    pub columns: Vec<ColumnConfig>,
}

/// Public data function - samples issues and infers their columns
pub async fn guess_data(config: &RunConfig, sample: u64) -> Result<GuessOutput> {
    validate_config(config).await.map_err(Error::from)?;

    let session = JiraSession::new(config)?;
    session.check_permission().await?;

    let issues = session
        .search(config.jql.as_deref(), 0, sample.max(1))
        .await?
        .into_issues();
    log::info!("guessing columns from {} issue(s)", issues.len());

    Ok(GuessOutput {
        columns: guess_columns(&issues),
    })
}

/// Handle the guess command
pub async fn handler(options: GuessOptions, config: RunConfig) -> Result<()> {
    let output = guess_data(&config, options.sample).await?;

    if output.columns.is_empty() {
        eprintln!("No issues found; nothing to guess from.");
        return Ok(());
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{}",
            toml::to_string_pretty(&output).wrap_err("Failed to render columns as TOML")?
        );
    }

    Ok(())
}
