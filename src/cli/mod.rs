//! Non-interactive command line front end over a JSON ledger snapshot.

pub mod args;
pub mod help;
pub mod output;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::analytics::GoalAnalyzer;
use crate::config::ConfigManager;
use crate::errors::AnalyticsError;
use crate::ledger::{LedgerSnapshot, LedgerSource};
use crate::time::{Clock, FixedClock, SystemClock};
use crate::utils::build_info;

use args::{AnalyzeArgs, Command};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

pub type CliResult<T> = Result<T, CliError>;

/// Parses process arguments and runs the selected command.
pub fn run_cli() -> CliResult<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    run(&args)
}

pub fn run(args: &[String]) -> CliResult<()> {
    match args::parse(args)? {
        Command::Analyze(analyze) => cmd_analyze(&analyze),
        Command::Version => {
            output::section(build_info::current().summary());
            Ok(())
        }
        Command::Help => {
            help::print_overview();
            Ok(())
        }
    }
}

fn cmd_analyze(args: &AnalyzeArgs) -> CliResult<()> {
    let config = match &args.config {
        Some(path) => ConfigManager::with_path(path.clone()).load()?,
        None => ConfigManager::new().load()?,
    };
    let clock: Arc<dyn Clock> = match args.today {
        Some(date) => Arc::new(FixedClock::on(date)),
        None => Arc::new(SystemClock),
    };
    let snapshot = load_snapshot(&args.snapshot)?;
    info!(path = %args.snapshot.display(), account = %args.account, "analysing snapshot");

    let analyzer = GoalAnalyzer::new(config, clock);
    let overview = analyzer.analyze_account(&snapshot, args.account)?;

    if args.json {
        let json = serde_json::to_string_pretty(&overview).map_err(AnalyticsError::from)?;
        println!("{json}");
        return Ok(());
    }
    let goals = snapshot.goals(args.account)?;
    output::print_overview(&overview, &goals, &analyzer.config().currency);
    Ok(())
}

fn load_snapshot(path: &Path) -> CliResult<LedgerSnapshot> {
    if !path.exists() {
        return Err(CliError::Usage(format!(
            "snapshot `{}` not found",
            path.display()
        )));
    }
    Ok(LedgerSnapshot::load_from_path(path)?)
}
