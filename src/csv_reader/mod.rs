pub(crate) mod column;

use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use csv::StringRecord;
use log::{info, warn};
use crate::timesheet::TimesheetRow;
use column::{parse_columns, ColumnMatcher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvError {
    FileNotFoundError(String),
    InvalidFileError(String),
    InvalidValueError(String),
}

impl fmt::Display for CsvError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "csv reading error: {}",
            match self {
                CsvError::FileNotFoundError(s) => s,
                CsvError::InvalidFileError(s) => s,
                CsvError::InvalidValueError(s) => s,
            }
        )
    }
}

impl std::error::Error for CsvError {}

/// Read a single timesheet export and normalize it to Description, Date, Hours (and Category if present)
pub(crate) fn read_timesheet(file_path: &Path, matcher: &ColumnMatcher) -> Result<Vec<TimesheetRow>, CsvError> {
    if !file_path.exists() {
        return Err(CsvError::FileNotFoundError(format!("{} not found", file_path.display())));
    }

    info!("Reading timesheet from {}", file_path.display());
    let file = File::open(file_path)
        .map_err(|e| CsvError::InvalidFileError(format!("{}: {}", file_path.display(), e)))?;
    read_timesheet_from(file, matcher, &file_path.display().to_string())
}

pub(crate) fn read_timesheet_from<R: io::Read>(reader: R, matcher: &ColumnMatcher, source: &str) -> Result<Vec<TimesheetRow>, CsvError> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);
    let headers = rdr.headers()
        .map_err(|e| CsvError::InvalidFileError(format!("{}: {}", source, e)))?
        .clone();
    let columns = parse_columns(&headers, matcher)
        .map_err(|e| match e {
            CsvError::InvalidFileError(s) => CsvError::InvalidFileError(format!("{}: {}", source, s)),
            other => other,
        })?;

    let mut rows :Vec<TimesheetRow> = vec![];
    for (i, record) in rdr.records().enumerate() {
        // header is line 1
        let line = i + 2;
        let record = record.map_err(|e| CsvError::InvalidFileError(format!("{} line {}: {}", source, line, e)))?;

        let hours = parse_hours(field(&record, columns.hours_column), source, line)?;
        let mut row = TimesheetRow::new(
            field(&record, columns.description_column),
            field(&record, columns.date_column),
            hours,
        );
        if let Some(category_column) = columns.category_column {
            row.category = field(&record, category_column).trim().to_string();
        }
        rows.push(row);
    }

    info!("Read {} rows from {}", rows.len(), source);
    Ok(rows)
}

/// Read several exports and concatenate their rows in the given order
pub(crate) fn read_timesheets(paths: &[PathBuf], matcher: &ColumnMatcher) -> Result<Vec<TimesheetRow>, CsvError> {
    let mut rows = vec![];
    for path in paths {
        rows.extend(read_timesheet(path, matcher)?);
    }
    Ok(rows)
}

fn field(record: &StringRecord, column: usize) -> &str {
    record.get(column).unwrap_or("")
}

fn parse_hours(s: &str, source: &str, line: usize) -> Result<f64, CsvError> {
    let cleaned = s.trim();
    if cleaned.is_empty() {
        warn!("{} line {}: empty hours, counting as 0", source, line);
        return Ok(0.0);
    }

    // decimal comma, e.g. 1,5
    let cleaned = if cleaned.contains(',') && !cleaned.contains('.') {
        cleaned.replace(',', ".")
    } else {
        cleaned.replace(',', "")
    };

    cleaned.parse::<f64>()
        .ok()
        .filter(|hours| hours.is_finite())
        .ok_or_else(|| CsvError::InvalidValueError(format!("{} line {}: '{}' is not a valid number of hours", source, line, s)))
}
