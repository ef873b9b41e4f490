use std::path::{Path, PathBuf};
use log::info;
use crate::categorize::categorize_rows;
use crate::category::CategoryMemo;
use crate::config::Config;
use crate::controller::{load_categorized, may_write};
use crate::csv_reader;
use crate::csv_reader::column::ColumnMatcher;
use crate::export;
use crate::import;
use crate::prompt::{Prompt, TerminalPrompt};
use crate::report;
use crate::review::review_and_edit_categories;

pub(crate) struct CategorizeOptions {
    pub(crate) inputs: Vec<PathBuf>,
    /// `None` when the categorized timesheet should not be saved
    pub(crate) output: Option<PathBuf>,
    pub(crate) memo: Option<PathBuf>,
    pub(crate) report: bool,
    pub(crate) assume_yes: bool,
}

pub(crate) fn execute_categorize(options: &CategorizeOptions, config: &Config, matcher: &ColumnMatcher) -> anyhow::Result<()> {
    let mut prompt = TerminalPrompt::new(config)?;
    let result = categorize_with(options, config, matcher, &mut prompt);
    prompt.save_history();
    result
}

fn categorize_with(options: &CategorizeOptions, config: &Config, matcher: &ColumnMatcher, prompt: &mut dyn Prompt) -> anyhow::Result<()> {
    let files = import::collect_input_files(&options.inputs, options.output.as_deref())?;
    let mut rows = csv_reader::read_timesheets(&files, matcher)?;
    info!("Loaded {} rows from {} files", rows.len(), files.len());

    let mut memo = match &options.memo {
        Some(path) => CategoryMemo::load(path)?,
        None => CategoryMemo::new(),
    };
    categorize_rows(&mut rows, &mut memo, prompt)?;

    if let Some(path) = &options.memo {
        memo.save(path)?;
    }

    if let Some(output) = &options.output {
        if may_write(output, options.assume_yes, prompt)? {
            export::save_records(&rows, output)?;
        }
    }

    if options.report {
        let summary = report::calculate_hours_by_category(&rows);
        report::print_hours_by_category(&summary);
        if may_write(&config.output.hours_by_category, options.assume_yes, prompt)? {
            export::save_records(&summary, &config.output.hours_by_category)?;
        }
    }

    Ok(())
}

pub(crate) fn execute_review(file: &Path, output: &Path, assume_yes: bool, config: &Config, matcher: &ColumnMatcher) -> anyhow::Result<()> {
    let mut prompt = TerminalPrompt::new(config)?;
    let result = review_with(file, output, assume_yes, matcher, &mut prompt);
    prompt.save_history();
    result
}

fn review_with(file: &Path, output: &Path, assume_yes: bool, matcher: &ColumnMatcher, prompt: &mut dyn Prompt) -> anyhow::Result<()> {
    let rows = load_categorized(file, matcher)?;
    let reviewed = review_and_edit_categories(&rows, prompt)?;

    if reviewed == rows {
        info!("No categories changed.");
    }
    if may_write(output, assume_yes, prompt)? {
        export::save_records(&reviewed, output)?;
    }
    Ok(())
}
