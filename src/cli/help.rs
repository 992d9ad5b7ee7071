use crate::cli::output;

const COMMANDS: &[(&str, &str)] = &[
    (
        "analyze <snapshot.json> (--user <id> | --group <id>) [--today YYYY-MM-DD] [--config <path>] [--json]",
        "Estimate the savings rate and project every goal of an account",
    ),
    ("version", "Show build metadata"),
    ("help", "Show available commands"),
];

pub fn print_overview() {
    output::section("Available commands");
    for (usage, description) in COMMANDS {
        output::info(format!("  {usage}"));
        output::info(format!("      {description}"));
    }
}
