use std::io::stdout;
use std::path::PathBuf;

use anyhow::anyhow;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use crossterm::tty::IsTty;
use log::{info, warn};
use rustyline::error::ReadlineError;
use rustyline::history::{DefaultHistory, History};
use rustyline::Editor;

use crate::config::{history_file, Config};
use crate::editor::CategoryHelper;

/// Line oriented conversation with the user
pub(crate) trait Prompt {
    /// Show a block of text
    fn say(&mut self, text: &str);

    /// Start a fresh screen before the next question
    fn clear(&mut self) {}

    /// Categories offered for completion on the next question
    fn set_suggestions(&mut self, _categories: &[String]) {}

    /// Read one line. `None` when the user closed the input (Ctrl-C / Ctrl-D).
    fn ask(&mut self, prompt: &str) -> anyhow::Result<Option<String>>;
}

/// Interactive terminal prompt backed by rustyline
pub(crate) struct TerminalPrompt {
    editor: Editor<CategoryHelper, DefaultHistory>,
    history_file: Option<PathBuf>,
    clear_screen: bool,
}

impl TerminalPrompt {
    pub(crate) fn new(config: &Config) -> anyhow::Result<TerminalPrompt> {
        let mut editor = Editor::<CategoryHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(CategoryHelper::new()));

        let history_file = if config.prompt.history { history_file() } else { None };
        if let Some(file) = &history_file {
            if editor.load_history(file).is_err() {
                info!("No previous history.");
            }
        }

        Ok(TerminalPrompt {
            editor,
            history_file,
            clear_screen: config.prompt.clear_screen && stdout().is_tty(),
        })
    }

    pub(crate) fn save_history(&mut self) {
        if let Some(file) = &self.history_file {
            if let Err(err) = self.editor.save_history(file) {
                warn!("Unable to save history to {}: {}", file.display(), err);
            }
        }
    }
}

impl Prompt for TerminalPrompt {
    fn say(&mut self, text: &str) {
        println!("{}", text);
    }

    fn clear(&mut self) {
        if self.clear_screen {
            if let Err(err) = execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0)) {
                warn!("Unable to clear terminal: {}", err);
            }
        }
    }

    fn set_suggestions(&mut self, categories: &[String]) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.categories = categories.to_vec();
        }
    }

    fn ask(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                remember_answer(self.editor.history_mut(), &line);
                Ok(Some(line))
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(anyhow!(err)),
        }
    }
}

/// Add a non-blank answer to the history. Returns whether it was added.
fn remember_answer<H: History>(history: &mut H, line: &str) -> bool {
    let entry = line.trim();
    if entry.is_empty() {
        return false;
    }
    match history.add(entry) {
        Ok(added) => added,
        Err(err) => {
            warn!("Unable to add history entry: {}", err);
            false
        }
    }
}

/// Ask a yes/no question, default is 'no'
pub(crate) fn confirm(prompt: &mut dyn Prompt, question: &str) -> anyhow::Result<bool> {
    loop {
        let answer = match prompt.ask(&format!("{} yes or no, default is 'no': ", question))? {
            Some(answer) => answer.trim().to_lowercase(),
            None => return Ok(false),
        };
        match answer.as_str() {
            "" | "n" | "no" => return Ok(false),
            "y" | "yes" => return Ok(true),
            _ => continue,
        }
    }
}
