use csv::StringRecord;
use regex::Regex;
use crate::config::ColumnAliases;
use crate::csv_reader::CsvError;

/// Contains column index of a CSV timesheet export.
/// Once the header is parsed we know which column stores description, date, hours and category.
/// The column number uses 0-based index.
#[derive(Debug, PartialEq)]
pub(crate) struct ColumnInfo {
    pub(crate) description_column: usize,
    pub(crate) date_column: usize,
    pub(crate) hours_column: usize,
    /// Only present in files that were already categorized
    pub(crate) category_column: Option<usize>,
}

/// Compiled header aliases
pub(crate) struct ColumnMatcher {
    description: Vec<Regex>,
    date: Vec<Regex>,
    hours: Vec<Regex>,
    category: Vec<Regex>,
}

impl ColumnMatcher {
    pub(crate) fn new(aliases: &ColumnAliases) -> Result<ColumnMatcher, regex::Error> {
        Ok(ColumnMatcher {
            description: compile_aliases(&aliases.description)?,
            date: compile_aliases(&aliases.date)?,
            hours: compile_aliases(&aliases.hours)?,
            category: compile_aliases(&aliases.category)?,
        })
    }
}

fn compile_aliases(aliases: &[String]) -> Result<Vec<Regex>, regex::Error> {
    aliases.iter()
        .map(|alias| Regex::new(&format!("(?i)^{}$", regex::escape(alias.trim()))))
        .collect()
}

pub(crate) fn parse_columns(headers: &StringRecord, matcher: &ColumnMatcher) -> Result<ColumnInfo, CsvError> {
    let description_column = find_column(headers, &matcher.description)
        .ok_or_else(|| CsvError::InvalidFileError("Unable to locate 'Description' column".to_string()))?;
    let date_column = find_column(headers, &matcher.date)
        .ok_or_else(|| CsvError::InvalidFileError("Unable to locate 'Date' column".to_string()))?;
    let hours_column = find_column(headers, &matcher.hours)
        .ok_or_else(|| CsvError::InvalidFileError("Unable to locate 'Hours' column".to_string()))?;

    Ok(ColumnInfo {
        description_column,
        date_column,
        hours_column,
        category_column: find_column(headers, &matcher.category),
    })
}

/// Aliases are tried in priority order, so "Start Date" is taken over a plain "Date".
fn find_column(headers: &StringRecord, aliases: &[Regex]) -> Option<usize> {
    for alias in aliases {
        for (i, header) in headers.iter().enumerate() {
            if alias.is_match(clean_header(header)) {
                return Some(i);
            }
        }
    }
    None
}

fn clean_header(header: &str) -> &str {
    header.trim_start_matches('\u{feff}').trim()
}
