mod selection;

use anyhow::bail;
use log::warn;
use crate::categorize::ask_category;
use crate::category::CategoryMemo;
use crate::prompt::Prompt;
use crate::timesheet::{assign_categories, TimesheetRow};
use selection::parse_selection;

const SELECTION_QUESTION: &str = "Enter a comma-separated list of numbers indicating entries you want to change (or \"done\"): ";

/// Let the user go over the description to category mapping of a categorized table and fix entries.
/// Returns the table with the edited categories applied once the user is done.
pub(crate) fn review_and_edit_categories(rows: &[TimesheetRow], prompt: &mut dyn Prompt) -> anyhow::Result<Vec<TimesheetRow>> {
    let mut memo = CategoryMemo::from_rows(rows);

    loop {
        prompt.say(&listing(&memo));

        let selected = loop {
            let answer = match prompt.ask(SELECTION_QUESTION)? {
                Some(answer) => answer,
                None => bail!("Review aborted, nothing saved"),
            };
            let answer = answer.trim();
            if answer.eq_ignore_ascii_case("done") {
                match assign_categories(rows, &memo) {
                    Ok(categorized) => return Ok(categorized),
                    Err(e) => {
                        prompt.say(&format!("Cannot finish yet, {}", e));
                        continue;
                    }
                }
            }
            if answer.is_empty() {
                continue;
            }
            if let Ok(numbers) = parse_selection(answer) {
                break numbers;
            }
        };

        for number in selected {
            let description = match memo.description_at(number) {
                Some(description) => description.to_string(),
                None => {
                    warn!("There is no entry {}", number);
                    continue;
                }
            };
            let current = memo.get(&description).unwrap_or_default().to_string();
            let category = ask_category(prompt, &description, Some(&current), &memo.category_list())?;
            memo.insert(&description, &category);
        }
    }
}

fn listing(memo: &CategoryMemo) -> String {
    memo.entries()
        .enumerate()
        .map(|(i, (description, category))| format!("{}. {} - {}", i + 1, category, description))
        .collect::<Vec<String>>()
        .join("\n")
}
