use std::collections::HashSet;
use anyhow::bail;
use log::info;
use crate::category::{resolve_category, CategoryMemo};
use crate::prompt::Prompt;
use crate::timesheet::TimesheetRow;

const CATEGORY_QUESTION: &str = "Enter a number for one of the above categories or enter a new category: ";

/// Assign a category to every row, asking the user once per distinct description.
/// Answers are kept in `memo`, so descriptions already in it are never asked again.
pub(crate) fn categorize_rows(rows: &mut [TimesheetRow], memo: &mut CategoryMemo, prompt: &mut dyn Prompt) -> anyhow::Result<()> {
    let pending: HashSet<&str> = rows.iter()
        .map(|r| r.description.as_str())
        .filter(|d| !memo.get(d).map(|c| !c.trim().is_empty()).unwrap_or(false))
        .collect();
    let total = pending.len();
    info!("{} rows, {} task descriptions to categorize", rows.len(), total);

    let mut asked = 0usize;
    for row in rows.iter_mut() {
        let category = match memo.get(&row.description) {
            Some(category) if !category.trim().is_empty() => category.to_string(),
            _ => {
                asked += 1;
                prompt.say(&format!("[{}/{}]", asked, total));
                let category = ask_category(prompt, &row.description, None, &memo.category_list())?;
                memo.insert(&row.description, &category);
                category
            }
        };
        row.category = category;
    }

    Ok(())
}

/// Ask for the category of a single task. `current` is shown when re-assigning.
pub(crate) fn ask_category(prompt: &mut dyn Prompt, description: &str, current: Option<&str>, category_list: &[String]) -> anyhow::Result<String> {
    prompt.clear();

    let mut text = format!("Provide the category for item:\n{}", description);
    if let Some(current) = current {
        text.push_str(&format!("\n(Currently it's assigned {})", current));
    }
    for (i, category) in category_list.iter().enumerate() {
        text.push_str(&format!("\n{}. {}", i + 1, category));
    }
    text.push('\n');
    prompt.say(&text);
    prompt.set_suggestions(category_list);

    loop {
        match prompt.ask(CATEGORY_QUESTION)? {
            Some(answer) if !answer.trim().is_empty() => return Ok(resolve_category(&answer, category_list)),
            Some(_) => continue,
            None => bail!("Categorization aborted, nothing saved"),
        }
    }
}
