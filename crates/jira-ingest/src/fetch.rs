//! Fetch issues and materialize them into records

use crate::client::{validate_config, JiraSession};
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use jira_ingest_core::config::RunConfig;
use jira_ingest_core::pagination::total_pages;
use jira_ingest_core::record::{materialize_record, Record, RecordBuilder};
use jira_ingest_core::schema::Schema;

/// Options for fetching issues
#[derive(Debug, clap::Args, Clone)]
#[command(after_help = "EXAMPLES:
  # Fetch every issue of a project as JSON lines:
  jira-ingest fetch --config jira.toml --jql \"project = PROJ\" --json

  # Preview the first 10 records as a table:
  jira-ingest fetch --config jira.toml --limit 10

NOTES:
  - Columns are declared in the [[columns]] section of the config file
  - Values that do not fit a column's type are written as null
  - Use `jira-ingest guess` to generate a starting set of columns")]
pub struct FetchOptions {
    /// Stop after this many records
    #[arg(short, long)]
    pub limit: Option<u64>,

    /// Output as JSON lines instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Summary of an ingestion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    pub total: u64,
    pub pages: u64,
    pub records: u64,
}

/// Public data function - validates `config`, then fetches every page and
/// passes the materialized records of each page to `emit`
pub async fn ingest_data<F>(
    config: &RunConfig,
    limit: Option<u64>,
    mut emit: F,
) -> Result<IngestSummary>
where
    F: FnMut(&Schema, Vec<Record>) -> Result<()>,
{
    validate_config(config).await.map_err(Error::from)?;

    let schema = Schema::from_configs(&config.columns);
    let session = JiraSession::new(config)?;
    session.check_permission().await?;

    let jql = config.jql.as_deref();
    let total = session.total_count(jql).await?;
    let wanted = limit.map_or(total, |limit| limit.min(total));
    log::info!(
        "{total} issue(s) match, fetching {wanted} in about {} page(s)",
        total_pages(wanted, config.max_results)
    );

    let mut builder = RecordBuilder::new(&schema);
    let mut records = 0;
    let mut pages = 0;

    // The server may cap maxResults below what was asked for, so the next
    // offset follows what was actually returned.
    while records < wanted {
        let page_size = config.max_results.min(wanted - records);
        let issues = session.search(jql, records, page_size).await?.into_issues();
        log::debug!("page at {records} returned {} issue(s)", issues.len());

        if issues.is_empty() {
            log::warn!("search returned no issues at offset {records} of {wanted}, stopping");
            break;
        }
        pages += 1;

        for issue in issues {
            if records >= wanted {
                break;
            }
            materialize_record(&issue, &schema, &mut builder);
            records += 1;
        }

        emit(&schema, builder.take_records())?;
    }

    Ok(IngestSummary {
        total,
        pages,
        records,
    })
}

/// Handle the fetch command
pub async fn handler(
    options: FetchOptions,
    config: RunConfig,
    global: crate::Global,
) -> Result<()> {
    if config.columns.is_empty() {
        return Err(eyre!(
            "No columns declared; add [[columns]] to the config file or run `jira-ingest guess`"
        ));
    }

    let mut table_rows: Vec<Record> = Vec::new();
    let mut table_schema: Option<Schema> = None;

    let summary = ingest_data(&config, options.limit, |schema, records| {
        if options.json {
            crate::output::write_json_lines(schema, &records)?;
        } else {
            table_schema.get_or_insert_with(|| schema.clone());
            table_rows.extend(records);
        }
        Ok(())
    })
    .await?;

    if !options.json {
        match &table_schema {
            Some(schema) if !table_rows.is_empty() => {
                crate::output::print_table(schema, &table_rows)
            }
            _ => println!("No issues found."),
        }
    }

    if global.verbose || !options.json {
        eprintln!(
            "\n{} {} of {} matching issue(s) in {} page(s)",
            "Fetched".green().bold(),
            summary.records,
            summary.total,
            summary.pages
        );
    }

    Ok(())
}
