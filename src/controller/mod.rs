mod categorize;
mod report;

use std::path::{Path, PathBuf};
use anyhow::Context;
use clap::Subcommand;
use log::info;
use crate::config::Config;
use crate::csv_reader;
use crate::csv_reader::column::ColumnMatcher;
use crate::export;
use crate::export::CsvRecord;
use crate::prompt::{confirm, Prompt, TerminalPrompt};
use crate::timesheet::TimesheetRow;

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Load timesheet exports and categorize every task interactively
    Categorize {
        /// CSV exports or directories containing them
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Where to save the categorized timesheet
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Do not save the categorized timesheet
        #[arg(long, conflicts_with = "output")]
        no_save: bool,
        /// Load and update remembered categories in this JSON file
        #[arg(long)]
        memo: Option<PathBuf>,
        /// Also print and save hours by category
        #[arg(long)]
        report: bool,
        /// Overwrite existing files without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Review and edit the categories of a categorized timesheet
    Review {
        file: PathBuf,
        /// Where to save the result, defaults to the reviewed file
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        yes: bool,
    },
    /// Total hours per category
    Hours {
        file: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, conflicts_with = "output")]
        no_save: bool,
        #[arg(short, long)]
        yes: bool,
    },
    /// Hours per task per date
    Tasks {
        file: PathBuf,
        /// Save the table to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        yes: bool,
    },
    /// Rows of a single category
    Filter {
        file: PathBuf,
        #[arg(short, long)]
        category: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        yes: bool,
    },
    /// Rows that have no category yet
    Uncategorized {
        file: PathBuf,
    },
    /// Distinct categories used in a timesheet
    Categories {
        file: PathBuf,
    },
}

pub(crate) fn run_command(command: Command, config: &Config) -> anyhow::Result<()> {
    let matcher = ColumnMatcher::new(&config.columns).context("Invalid column aliases in config")?;

    match command {
        Command::Categorize { inputs, output, no_save, memo, report, yes } => {
            let output = if no_save { None } else { Some(output.unwrap_or_else(|| config.output.categorized.clone())) };
            let options = categorize::CategorizeOptions { inputs, output, memo, report, assume_yes: yes };
            categorize::execute_categorize(&options, config, &matcher)
        }
        Command::Review { file, output, yes } => {
            let output = output.unwrap_or_else(|| file.clone());
            categorize::execute_review(&file, &output, yes, config, &matcher)
        }
        Command::Hours { file, output, no_save, yes } => {
            let output = if no_save { None } else { Some(output.unwrap_or_else(|| config.output.hours_by_category.clone())) };
            report::execute_hours(&file, output.as_deref(), yes, config, &matcher)
        }
        Command::Tasks { file, output, yes } => {
            report::execute_tasks(&file, output.as_deref(), yes, config, &matcher)
        }
        Command::Filter { file, category, output, yes } => {
            report::execute_filter(&file, &category, output.as_deref(), yes, config, &matcher)
        }
        Command::Uncategorized { file } => report::execute_uncategorized(&file, &matcher),
        Command::Categories { file } => report::execute_categories(&file, &matcher),
    }
}

fn load_categorized(file: &Path, matcher: &ColumnMatcher) -> anyhow::Result<Vec<TimesheetRow>> {
    csv_reader::read_timesheet(file, matcher).with_context(|| format!("Unable to load {}", file.display()))
}

/// Save a report, asking on the terminal before replacing an existing file
fn save_report<T: CsvRecord>(records: &[T], path: &Path, assume_yes: bool, config: &Config) -> anyhow::Result<()> {
    if !assume_yes && path.exists() {
        let mut prompt = TerminalPrompt::new(config)?;
        if !may_write(path, false, &mut prompt)? {
            return Ok(());
        }
    }
    export::save_records(records, path)
}

/// Whether `path` may be written. Existing files are only replaced after confirmation.
fn may_write(path: &Path, assume_yes: bool, prompt: &mut dyn Prompt) -> anyhow::Result<bool> {
    if assume_yes || !path.exists() {
        return Ok(true);
    }

    let overwrite = confirm(prompt, &format!("{} already exists. Overwrite?", path.display()))?;
    if !overwrite {
        info!("Not saving {}", path.display());
    }
    Ok(overwrite)
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use clap::Parser;
    use crate::controller::{may_write, Command};
    use crate::csv_reader::tests::fixture_filename;
    use crate::prompt::tests::ScriptedPrompt;
    use crate::Cli;

    #[test]
    fn test_may_write() {
        let existing = fixture_filename("categorized.csv");
        let mut prompt = ScriptedPrompt::new(&[]);
        assert!(may_write(Path::new("no-such-output.csv"), false, &mut prompt).unwrap());
        assert!(may_write(&existing, true, &mut prompt).unwrap());
        assert!(prompt.questions.is_empty());

        assert!(!may_write(&existing, false, &mut prompt).unwrap());
        assert!(may_write(&existing, false, &mut ScriptedPrompt::new(&["yes"])).unwrap());
    }

    #[test]
    fn test_parse_categorize_args() {
        let cli = Cli::try_parse_from(["timesheet-analyzer", "categorize", "week1.csv", "exports", "--memo", "memo.json", "--report"]).unwrap();
        match cli.command {
            Command::Categorize { inputs, output, no_save, memo, report, yes } => {
                assert_eq!(inputs.len(), 2);
                assert!(output.is_none());
                assert!(!no_save);
                assert_eq!(memo.unwrap().to_str(), Some("memo.json"));
                assert!(report);
                assert!(!yes);
            },
            _ => panic!("Unexpected command")
        }
    }

    #[test]
    fn test_no_save_conflicts_with_output() {
        assert!(Cli::try_parse_from(["timesheet-analyzer", "categorize", "week1.csv", "--no-save", "-o", "out.csv"]).is_err());
        assert!(Cli::try_parse_from(["timesheet-analyzer", "hours", "t.csv", "--no-save", "--output", "out.csv"]).is_err());
        assert!(Cli::try_parse_from(["timesheet-analyzer", "hours", "t.csv", "--no-save"]).is_ok());
    }

    #[test]
    fn test_categorize_requires_input() {
        assert!(Cli::try_parse_from(["timesheet-analyzer", "categorize"]).is_err());
    }

    #[test]
    fn test_parse_filter_args() {
        let cli = Cli::try_parse_from(["timesheet-analyzer", "--config", "c.toml", "filter", "t.csv", "-c", "Meetings"]).unwrap();
        assert_eq!(cli.config.unwrap().to_str(), Some("c.toml"));
        match cli.command {
            Command::Filter { category, output, .. } => {
                assert_eq!(category, "Meetings");
                assert!(output.is_none());
            },
            _ => panic!("Unexpected command")
        }
    }
}
