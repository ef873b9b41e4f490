use std::collections::BTreeMap;
use chrono::NaiveDate;
use comfy_table::{Cell, CellAlignment, Table, TableComponent};
use lazy_static::lazy_static;
use regex::Regex;
use log::warn;
use serde::Serialize;
use crate::export::CsvRecord;
use crate::timesheet::TimesheetRow;

/// Total hours of one category
#[derive(Serialize, Debug, Clone, PartialEq)]
pub(crate) struct CategoryHours {
    #[serde(rename = "Category")]
    pub(crate) category: String,
    #[serde(rename = "Hours")]
    pub(crate) hours: f64,
}

impl CsvRecord for CategoryHours {
    const HEADERS: &'static [&'static str] = &["Category", "Hours"];
}

/// Total hours spent on a task on a given date
#[derive(Serialize, Debug, Clone, PartialEq)]
pub(crate) struct TaskDateHours {
    #[serde(rename = "Description")]
    pub(crate) description: String,
    #[serde(rename = "Category")]
    pub(crate) category: String,
    #[serde(rename = "Date")]
    pub(crate) date: String,
    #[serde(rename = "Hours")]
    pub(crate) hours: f64,
}

impl CsvRecord for TaskDateHours {
    const HEADERS: &'static [&'static str] = &["Description", "Category", "Date", "Hours"];
}

/// Sum hours per category. Rows without a category are left out of the summary.
pub(crate) fn calculate_hours_by_category(rows: &[TimesheetRow]) -> Vec<CategoryHours> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    let mut skipped_rows = 0usize;
    let mut skipped_hours = 0.0;
    for r in rows {
        if !r.is_categorized() {
            skipped_rows += 1;
            skipped_hours += r.hours;
            continue;
        }
        *totals.entry(r.category.as_str()).or_insert(0.0) += r.hours;
    }
    if skipped_rows > 0 {
        warn!("Left out {} rows ({} hours) without a category", skipped_rows, round_hours(skipped_hours));
    }

    totals.into_iter()
        .map(|(category, hours)| CategoryHours { category: category.to_string(), hours: round_hours(hours) })
        .collect()
}

pub(crate) fn total_hours(summary: &[CategoryHours]) -> f64 {
    round_hours(summary.iter().map(|c| c.hours).sum())
}

/// Sum hours per (description, category, date), dates in calendar order
pub(crate) fn aggregate_by_task_and_date(rows: &[TimesheetRow]) -> Vec<TaskDateHours> {
    let mut totals: BTreeMap<(&str, &str, Option<NaiveDate>, &str), f64> = BTreeMap::new();
    for r in rows {
        let key = (r.description.as_str(), r.category.as_str(), parse_date(&r.date), r.date.as_str());
        *totals.entry(key).or_insert(0.0) += r.hours;
    }

    totals.into_iter()
        .map(|((description, category, _, date), hours)| TaskDateHours {
            description: description.to_string(),
            category: category.to_string(),
            date: date.to_string(),
            hours: round_hours(hours),
        })
        .collect()
}

lazy_static! {
    static ref YYYY_MM_DD: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    static ref MM_DD_YYYY: Regex = Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap();
    static ref DD_MM_YYYY: Regex = Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").unwrap();
}

/// Recognize the date formats time trackers export. Clockify writes MM/DD/YYYY.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if YYYY_MM_DD.is_match(s) {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    } else if MM_DD_YYYY.is_match(s) {
        NaiveDate::parse_from_str(s, "%m/%d/%Y").ok()
    } else if DD_MM_YYYY.is_match(s) {
        NaiveDate::parse_from_str(s, "%d.%m.%Y").ok()
    } else {
        None
    }
}

fn round_hours(hours: f64) -> f64 {
    (hours * 10_000.0).round() / 10_000.0
}

fn format_hours(hours: f64) -> String {
    format!("{}", round_hours(hours))
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.remove_style(TableComponent::HorizontalLines);
    table.remove_style(TableComponent::MiddleIntersections);
    table.remove_style(TableComponent::LeftBorderIntersections);
    table.remove_style(TableComponent::RightBorderIntersections);
    table
}

pub(crate) fn print_hours_by_category(summary: &[CategoryHours]) {
    let mut table = new_table();
    table.set_header(vec!["Category", "Hours"]);
    for c in summary {
        table.add_row(vec![
            Cell::new(c.category.as_str()),
            Cell::new(format_hours(c.hours).as_str()).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
    println!("Total hours: {}", format_hours(total_hours(summary)));
}

pub(crate) fn print_task_date_hours(records: &[TaskDateHours]) {
    let mut table = new_table();
    table.set_header(vec!["Description", "Category", "Date", "Hours"]);
    for r in records {
        table.add_row(vec![
            Cell::new(r.description.as_str()),
            Cell::new(r.category.as_str()),
            Cell::new(r.date.as_str()),
            Cell::new(format_hours(r.hours).as_str()).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
}

pub(crate) fn print_rows(rows: &[&TimesheetRow]) {
    let mut table = new_table();
    table.set_header(vec!["Description", "Date", "Hours", "Category"]);
    for r in rows {
        table.add_row(vec![
            Cell::new(r.description.as_str()),
            Cell::new(r.date.as_str()),
            Cell::new(format_hours(r.hours).as_str()).set_alignment(CellAlignment::Right),
            Cell::new(r.category.as_str()),
        ]);
    }
    println!("{table}");
}
