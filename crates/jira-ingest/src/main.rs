use crate::prelude::{eprintln, *};
use clap::Parser;

mod check;
mod client;
mod config;
mod error;
mod fetch;
mod guess;
mod output;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Fetch Jira issues and materialize them into typed records"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    config: config::ConfigOptions,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "JIRA_INGEST_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Validate the configuration and credentials
    Check(check::CheckOptions),

    /// Fetch issues and print them as typed records
    Fetch(fetch::FetchOptions),

    /// Suggest column declarations from a sample of issues
    Guess(guess::GuessOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();
    let run_config = app.config.load()?;

    if app.global.verbose {
        eprintln!("Loaded configuration: {:?}", run_config);
    }

    match app.command {
        SubCommands::Check(options) => check::handler(options, run_config).await,
        SubCommands::Fetch(options) => fetch::handler(options, run_config, app.global).await,
        SubCommands::Guess(options) => guess::handler(options, run_config).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
