use std::borrow::Cow::{self, Owned};

use rustyline::completion::Completer;
use rustyline::highlight::Highlighter;
use rustyline::hint::HistoryHinter;
use rustyline::{Context, Helper, Hinter, Validator};

/// Line editor helper for category prompts. Tab completes known category names.
#[derive(Helper, Hinter, Validator)]
pub(crate) struct CategoryHelper {
    pub(crate) categories: Vec<String>,
    #[rustyline(Hinter)]
    pub(crate) hinter: HistoryHinter,
}

impl CategoryHelper {
    pub(crate) fn new() -> CategoryHelper {
        CategoryHelper { categories: vec![], hinter: HistoryHinter {} }
    }

    fn candidates(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.trim_start().to_lowercase();
        self.categories.iter()
            .filter(|c| c.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect()
    }
}

impl Completer for CategoryHelper {
    type Candidate = String;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<String>)> {
        // The whole line is one category, so completion always replaces from the start
        Ok((0, self.candidates(&line[..pos])))
    }
}

impl Highlighter for CategoryHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned("\x1b[2m".to_owned() + hint + "\x1b[m")
    }
}

#[cfg(test)]
mod tests {
    use crate::editor::CategoryHelper;

    #[test]
    fn test_candidates() {
        let mut helper = CategoryHelper::new();
        helper.categories = vec!["Development".to_string(), "Design".to_string(), "Meetings".to_string()];
        assert_eq!(helper.candidates("de"), vec!["Development", "Design"]);
        assert_eq!(helper.candidates("  Dev"), vec!["Development"]);
        assert_eq!(helper.candidates(""), helper.categories);
        assert!(helper.candidates("x").is_empty());
    }
}
