use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};
use crate::timesheet::TimesheetRow;

/// Memoized mapping from task description to category.
/// Keeps descriptions in the order they were first seen so listings stay stable.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct CategoryMemo {
    order: Vec<String>,
    categories: HashMap<String, String>,
}

/// On-disk form of a single memo entry
#[derive(Serialize, Deserialize, Debug)]
struct MemoEntry {
    description: String,
    category: String,
}

impl CategoryMemo {
    pub(crate) fn new() -> CategoryMemo {
        CategoryMemo::default()
    }

    /// Build the memo from an already categorized table. Later rows overwrite earlier ones.
    pub(crate) fn from_rows(rows: &[TimesheetRow]) -> CategoryMemo {
        let mut memo = CategoryMemo::new();
        for row in rows {
            memo.insert(&row.description, &row.category);
        }
        memo
    }

    pub(crate) fn get(&self, description: &str) -> Option<&str> {
        self.categories.get(description).map(String::as_str)
    }

    pub(crate) fn insert(&mut self, description: &str, category: &str) {
        if !self.categories.contains_key(description) {
            self.order.push(description.to_string());
        }
        self.categories.insert(description.to_string(), category.to_string());
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    /// Description at a 1-based listing position
    pub(crate) fn description_at(&self, position: usize) -> Option<&str> {
        if position == 0 {
            return None;
        }
        self.order.get(position - 1).map(String::as_str)
    }

    /// (description, category) pairs in first-seen order
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order.iter().map(move |d| (d.as_str(), self.categories[d].as_str()))
    }

    /// Sorted distinct categories offered as numbered choices
    pub(crate) fn category_list(&self) -> Vec<String> {
        self.categories.values()
            .filter(|c| !c.trim().is_empty())
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }

    /// Load a memo saved by an earlier run. A missing file is an empty memo.
    pub(crate) fn load(path: &Path) -> anyhow::Result<CategoryMemo> {
        if !path.exists() {
            info!("No category memo at {}, starting empty", path.display());
            return Ok(CategoryMemo::new());
        }

        let content = fs::read_to_string(path).with_context(|| format!("Unable to read {}", path.display()))?;
        let memo = CategoryMemo::from_json(&content).with_context(|| format!("Invalid category memo {}", path.display()))?;
        info!("Loaded {} memoized categories from {}", memo.len(), path.display());
        Ok(memo)
    }

    pub(crate) fn save(&self, path: &Path) -> anyhow::Result<()> {
        fs::write(path, self.to_json()?).with_context(|| format!("Unable to write {}", path.display()))?;
        info!("Saved {} memoized categories to {}", self.len(), path.display());
        Ok(())
    }

    fn from_json(content: &str) -> serde_json::Result<CategoryMemo> {
        let entries: Vec<MemoEntry> = serde_json::from_str(content)?;
        let mut memo = CategoryMemo::new();
        for e in entries {
            memo.insert(&e.description, &e.category);
        }
        Ok(memo)
    }

    fn to_json(&self) -> serde_json::Result<String> {
        let entries: Vec<MemoEntry> = self.entries()
            .map(|(description, category)| MemoEntry { description: description.to_string(), category: category.to_string() })
            .collect();
        serde_json::to_string_pretty(&entries)
    }
}

/// Turn a user answer into a category. A number within the list picks that entry,
/// anything else (out of range numbers included) is a new category.
pub(crate) fn resolve_category(answer: &str, category_list: &[String]) -> String {
    let answer = answer.trim();
    match answer.parse::<usize>() {
        Ok(n) if n > 0 && n <= category_list.len() => category_list[n - 1].clone(),
        _ => answer.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use crate::category::{resolve_category, CategoryMemo};
    use crate::timesheet::TimesheetRow;

    #[test]
    fn test_insert_keeps_first_seen_order() {
        let mut memo = CategoryMemo::new();
        memo.insert("b", "Dev");
        memo.insert("a", "Admin");
        memo.insert("b", "Meetings");

        let entries: Vec<(&str, &str)> = memo.entries().collect();
        assert_eq!(entries, vec![("b", "Meetings"), ("a", "Admin")]);
        assert_eq!(memo.description_at(1), Some("b"));
        assert_eq!(memo.description_at(0), None);
        assert_eq!(memo.description_at(3), None);
    }

    #[test]
    fn test_category_list() {
        let mut memo = CategoryMemo::new();
        memo.insert("standup", "Meetings");
        memo.insert("retro", "Meetings");
        memo.insert("bugfix", "Development");
        memo.insert("??", "");
        assert_eq!(memo.category_list(), vec!["Development", "Meetings"]);
    }

    #[test]
    fn test_from_rows_last_row_wins() {
        let rows = vec![
            TimesheetRow::new("standup", "d1", 1.0).with_category("Meetings"),
            TimesheetRow::new("bugfix", "d1", 1.0).with_category("Development"),
            TimesheetRow::new("standup", "d2", 1.0).with_category("Communication"),
        ];
        let memo = CategoryMemo::from_rows(&rows);
        assert_eq!(memo.len(), 2);
        assert_eq!(memo.description_at(1), Some("standup"));
        assert_eq!(memo.get("standup"), Some("Communication"));
    }

    #[test]
    fn test_resolve_category() {
        let list = vec!["Development".to_string(), "Meetings".to_string()];
        assert_eq!(resolve_category("2", &list), "Meetings");
        assert_eq!(resolve_category(" 1 ", &list), "Development");
        assert_eq!(resolve_category("3", &list), "3");
        assert_eq!(resolve_category("0", &list), "0");
        assert_eq!(resolve_category("  Admin ", &list), "Admin");
        assert_eq!(resolve_category("1", &[]), "1");
    }

    #[test]
    fn test_json() {
        let mut memo = CategoryMemo::new();
        memo.insert("Fix \"login\" bug", "Development");
        memo.insert("Standup", "Meetings");

        let json = memo.to_json().unwrap();
        assert!(json.contains("\"description\": \"Standup\""));
        assert_eq!(CategoryMemo::from_json(&json).unwrap(), memo);
        assert!(CategoryMemo::from_json("{\"Standup\": 1}").is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("timesheet-analyzer-memo-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        // missing file is an empty memo
        assert_eq!(CategoryMemo::load(&path).unwrap(), CategoryMemo::new());

        let mut memo = CategoryMemo::new();
        memo.insert("Standup", "Meetings");
        memo.insert("Fix login bug", "Development");
        memo.save(&path).unwrap();

        let loaded = CategoryMemo::load(&path).unwrap();
        assert_eq!(loaded, memo);
        assert_eq!(loaded.description_at(1), Some("Standup"));

        std::fs::write(&path, "not json").unwrap();
        assert!(CategoryMemo::load(&path).is_err());
        std::fs::remove_file(&path).unwrap();
    }
}
