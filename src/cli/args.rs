use std::path::PathBuf;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::cli::{CliError, CliResult};
use crate::domain::AccountRef;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Analyze(AnalyzeArgs),
    Version,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeArgs {
    pub snapshot: PathBuf,
    pub account: AccountRef,
    pub today: Option<NaiveDate>,
    pub config: Option<PathBuf>,
    pub json: bool,
}

pub fn parse(args: &[String]) -> CliResult<Command> {
    let Some((command, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };
    match command.to_lowercase().as_str() {
        "analyze" | "analyse" => parse_analyze(rest).map(Command::Analyze),
        "version" | "--version" | "-V" => Ok(Command::Version),
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(CliError::Usage(format!(
            "unknown command `{other}`; try `help`"
        ))),
    }
}

fn parse_analyze(args: &[String]) -> CliResult<AnalyzeArgs> {
    let mut snapshot = None;
    let mut account = None;
    let mut today = None;
    let mut config = None;
    let mut json = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--user" => account = Some(AccountRef::User(parse_id(iter.next(), "--user")?)),
            "--group" => account = Some(AccountRef::Group(parse_id(iter.next(), "--group")?)),
            "--today" => {
                let raw = value(iter.next(), "--today")?;
                let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                    CliError::Usage(format!("`{raw}` is not a YYYY-MM-DD date"))
                })?;
                today = Some(date);
            }
            "--config" => config = Some(PathBuf::from(value(iter.next(), "--config")?)),
            "--json" => json = true,
            flag if flag.starts_with("--") => {
                return Err(CliError::Usage(format!("unknown option `{flag}`")))
            }
            path if snapshot.is_none() => snapshot = Some(PathBuf::from(path)),
            extra => return Err(CliError::Usage(format!("unexpected argument `{extra}`"))),
        }
    }

    Ok(AnalyzeArgs {
        snapshot: snapshot
            .ok_or_else(|| CliError::Usage("analyze needs a snapshot file".into()))?,
        account: account
            .ok_or_else(|| CliError::Usage("analyze needs --user <id> or --group <id>".into()))?,
        today,
        config,
        json,
    })
}

fn value<'a>(next: Option<&'a String>, flag: &str) -> CliResult<&'a str> {
    next.map(String::as_str)
        .ok_or_else(|| CliError::Usage(format!("{flag} expects a value")))
}

fn parse_id(next: Option<&String>, flag: &str) -> CliResult<Uuid> {
    let raw = value(next, flag)?;
    Uuid::parse_str(raw).map_err(|_| CliError::Usage(format!("`{raw}` is not a valid id")))
}
