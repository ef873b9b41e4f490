use std::collections::BTreeSet;
use std::fmt;
use serde::{Deserialize, Serialize};
use crate::category::CategoryMemo;
use crate::export::CsvRecord;

/// One logged work entry, normalized to the columns used for reporting
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct TimesheetRow {
    #[serde(rename = "Description")]
    pub(crate) description: String,
    #[serde(rename = "Date")]
    pub(crate) date: String,
    #[serde(rename = "Hours")]
    pub(crate) hours: f64,
    #[serde(rename = "Category", default)]
    pub(crate) category: String,
}

impl CsvRecord for TimesheetRow {
    const HEADERS: &'static [&'static str] = &["Description", "Date", "Hours", "Category"];
}

impl TimesheetRow {
    pub(crate) fn new(description: &str, date: &str, hours: f64) -> TimesheetRow {
        TimesheetRow {
            description: description.to_string(),
            date: date.to_string(),
            hours,
            category: String::new(),
        }
    }

    pub(crate) fn with_category(mut self, category: &str) -> TimesheetRow {
        self.category = category.to_string();
        self
    }

    pub(crate) fn is_categorized(&self) -> bool {
        !self.category.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimesheetError {
    /// A task description without a category in the memo
    Unassigned(String),
}

impl fmt::Display for TimesheetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TimesheetError::Unassigned(description) => write!(f, "no category assigned for task '{}'", description),
        }
    }
}

impl std::error::Error for TimesheetError {}

pub(crate) fn filter_by_category<'a>(rows: &'a [TimesheetRow], category: &str) -> Vec<&'a TimesheetRow> {
    rows.iter().filter(|r| r.category == category).collect()
}

/// Rows still waiting for a category
pub(crate) fn uncategorized(rows: &[TimesheetRow]) -> Vec<&TimesheetRow> {
    rows.iter().filter(|r| !r.is_categorized()).collect()
}

/// Sorted distinct categories found in the table
pub(crate) fn extract_categories(rows: &[TimesheetRow]) -> Vec<String> {
    rows.iter()
        .map(|r| r.category.clone())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Copy the table, taking every row's category from the memo.
/// Fails on the first description that has no non-empty category.
pub(crate) fn assign_categories(rows: &[TimesheetRow], memo: &CategoryMemo) -> Result<Vec<TimesheetRow>, TimesheetError> {
    let mut categorized = Vec::with_capacity(rows.len());
    for row in rows {
        match memo.get(&row.description) {
            Some(category) if !category.trim().is_empty() => {
                categorized.push(row.clone().with_category(category));
            }
            _ => return Err(TimesheetError::Unassigned(row.description.clone())),
        }
    }

    Ok(categorized)
}

#[cfg(test)]
mod tests {
    use crate::category::CategoryMemo;
    use crate::timesheet::{assign_categories, extract_categories, filter_by_category, uncategorized, TimesheetError, TimesheetRow};

    fn rows() -> Vec<TimesheetRow> {
        vec![
            TimesheetRow::new("Standup", "01/30/2023", 0.25).with_category("Meetings"),
            TimesheetRow::new("Fix login bug", "01/30/2023", 2.5).with_category("Development"),
            TimesheetRow::new("Standup", "01/31/2023", 0.25).with_category("Meetings"),
            TimesheetRow::new("Expense report", "01/31/2023", 0.5),
        ]
    }

    #[test]
    fn test_filter_by_category() {
        let rows = rows();
        let meetings = filter_by_category(&rows, "Meetings");
        assert_eq!(meetings.len(), 2);
        assert!(meetings.iter().all(|r| r.description == "Standup"));
        assert!(filter_by_category(&rows, "meetings").is_empty());
    }

    #[test]
    fn test_uncategorized() {
        let mut rows = rows();
        rows[1].category = "  ".to_string();
        let missing: Vec<&str> = uncategorized(&rows).iter().map(|r| r.description.as_str()).collect();
        assert_eq!(missing, vec!["Fix login bug", "Expense report"]);
    }

    #[test]
    fn test_extract_categories() {
        let rows = rows();
        assert_eq!(extract_categories(&rows[..3]), vec!["Development", "Meetings"]);
    }

    #[test]
    fn test_assign_categories() {
        let rows = rows();
        let mut memo = CategoryMemo::new();
        memo.insert("Standup", "Communication");
        memo.insert("Fix login bug", "Development");
        memo.insert("Expense report", "Admin");

        let categorized = assign_categories(&rows, &memo).unwrap();
        assert_eq!(categorized.len(), 4);
        assert_eq!(categorized[0].category, "Communication");
        assert_eq!(categorized[2].category, "Communication");
        assert_eq!(categorized[3].category, "Admin");
        // input untouched
        assert_eq!(rows[0].category, "Meetings");
    }

    #[test]
    fn test_assign_categories_unassigned() {
        let rows = rows();
        let mut memo = CategoryMemo::new();
        memo.insert("Standup", "Meetings");
        memo.insert("Fix login bug", "");

        assert_eq!(assign_categories(&rows, &memo), Err(TimesheetError::Unassigned("Fix login bug".to_string())));
    }
}
