use std::path::Path;
use log::info;
use crate::config::Config;
use crate::controller::{load_categorized, save_report};
use crate::csv_reader::column::ColumnMatcher;
use crate::report;
use crate::timesheet;

pub(crate) fn execute_hours(file: &Path, output: Option<&Path>, assume_yes: bool, config: &Config, matcher: &ColumnMatcher) -> anyhow::Result<()> {
    let rows = load_categorized(file, matcher)?;
    let summary = report::calculate_hours_by_category(&rows);
    report::print_hours_by_category(&summary);

    if let Some(output) = output {
        save_report(&summary, output, assume_yes, config)?;
    }
    Ok(())
}

pub(crate) fn execute_tasks(file: &Path, output: Option<&Path>, assume_yes: bool, config: &Config, matcher: &ColumnMatcher) -> anyhow::Result<()> {
    let rows = load_categorized(file, matcher)?;
    let records = report::aggregate_by_task_and_date(&rows);
    report::print_task_date_hours(&records);

    if let Some(output) = output {
        save_report(&records, output, assume_yes, config)?;
    }
    Ok(())
}

pub(crate) fn execute_filter(file: &Path, category: &str, output: Option<&Path>, assume_yes: bool, config: &Config, matcher: &ColumnMatcher) -> anyhow::Result<()> {
    let rows = load_categorized(file, matcher)?;
    let filtered = timesheet::filter_by_category(&rows, category);
    report::print_rows(&filtered);
    info!("{} rows in category '{}'", filtered.len(), category);

    if let Some(output) = output {
        save_report(&filtered, output, assume_yes, config)?;
    }
    Ok(())
}

pub(crate) fn execute_uncategorized(file: &Path, matcher: &ColumnMatcher) -> anyhow::Result<()> {
    let rows = load_categorized(file, matcher)?;
    let missing = timesheet::uncategorized(&rows);
    if missing.is_empty() {
        info!("Every row in {} has a category.", file.display());
        return Ok(());
    }

    report::print_rows(&missing);
    println!("{} rows without a category", missing.len());
    Ok(())
}

pub(crate) fn execute_categories(file: &Path, matcher: &ColumnMatcher) -> anyhow::Result<()> {
    let rows = load_categorized(file, matcher)?;
    for category in timesheet::extract_categories(&rows).iter().filter(|c| !c.is_empty()) {
        println!("{}", category);
    }
    Ok(())
}
