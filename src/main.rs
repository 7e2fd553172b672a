use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use pr_checker::app::{run, CliOverrides, RunError, RunOptions, RunSummary, Settings};
use pr_checker::services::{get_github_token, load_config, ConfigError, OctocrabApi};

/// List fresh open and draft pull requests across an organization
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: (),

    /// GitHub access token
    #[arg(long)]
    token: Option<String>,

    /// Organization name
    #[arg(long = "org-name")]
    org_name: Option<String>,

    /// Use no color, nothing fancy mode
    #[arg(
        long = "be-ugly",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    be_ugly: Option<bool>,

    /// Maximum number of repositories fetched at the same time
    #[arg(long)]
    concurrency: Option<usize>,

    /// Report repositories that failed to load instead of aborting
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    keep_going: Option<bool>,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            token: self.token.clone(),
            org_name: self.org_name.clone(),
            ugly: self.be_ugly,
            concurrency: self.concurrency,
            keep_going: self.keep_going,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "pr_checker=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

const EXIT_OK: u8 = 0;
const EXIT_FAILURE: u8 = 1;

/// How a run ended, when it did not fail outright
#[derive(Debug)]
enum Exit {
    Reported(RunSummary),
    MissingParameters,
    Config(ConfigError),
    NoAccess(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = try_main(cli).await;
    match &result {
        Ok(Exit::Reported(summary)) => info!(
            "Printed {} of {} repositories ({} skipped after errors)",
            summary.printed, summary.repositories, summary.failures
        ),
        Ok(Exit::MissingParameters) => {
            println!("Missing command line args or a config file at `$HOME/.pr-checker/config.json`");
            println!("Run: pr-checker --help");
        }
        Ok(Exit::Config(err)) => eprintln!("Issue with config. Error: {err}"),
        Ok(Exit::NoAccess(org)) => eprintln!("No access to org: {org}"),
        Err(err) => eprintln!("Error: {err:?}"),
    }

    ExitCode::from(exit_status(&result))
}

async fn try_main(cli: Cli) -> Result<Exit> {
    let file_config = match load_config() {
        Ok(config) => config,
        Err(err) => return Ok(Exit::Config(err)),
    };

    let mut settings = Settings::resolve(cli.overrides(), file_config);
    if settings.token.is_none() {
        debug!("No token configured, asking the gh CLI");
        settings.token = get_github_token();
    }

    let Some((token, options)) = prepare(&settings) else {
        return Ok(Exit::MissingParameters);
    };

    let api = OctocrabApi::new(token).context("Failed to create GitHub client")?;
    let now = chrono::Utc::now();

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    classify(run(Arc::new(api), &options, now, &mut stdout, &mut stderr).await)
}

/// Token and run options, or `None` when either is still missing
fn prepare(settings: &Settings) -> Option<(String, RunOptions)> {
    Some((settings.token.clone()?, settings.run_options()?))
}

fn classify(result: Result<RunSummary, RunError>) -> Result<Exit> {
    match result {
        Ok(summary) => Ok(Exit::Reported(summary)),
        Err(RunError::NoAccess(org)) => Ok(Exit::NoAccess(org)),
        Err(err) => Err(err).context("Failed to build pull request report"),
    }
}

fn exit_status(result: &Result<Exit>) -> u8 {
    match result {
        Ok(Exit::Reported(_)) | Ok(Exit::MissingParameters) => EXIT_OK,
        Ok(Exit::Config(_)) | Ok(Exit::NoAccess(_)) | Err(_) => EXIT_FAILURE,
    }
}
