use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{bail, Context};
use log::info;
use serde::Deserialize;

const APP_DIR: &str = "timesheet-analyzer";
const CONFIG_FILE: &str = "config.toml";
static HISTORY_FILE: &str = ".timesheet_analyzer_history";

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) columns: ColumnAliases,
    pub(crate) output: OutputFiles,
    pub(crate) prompt: PromptConfig,
}

/// Header names accepted for each normalized column, tried in order
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct ColumnAliases {
    pub(crate) description: Vec<String>,
    pub(crate) date: Vec<String>,
    pub(crate) hours: Vec<String>,
    pub(crate) category: Vec<String>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        ColumnAliases {
            description: vec!["Description".to_string()],
            date: vec!["Start Date".to_string(), "Date".to_string()],
            hours: vec!["Duration (decimal)".to_string(), "Hours".to_string()],
            category: vec!["Category".to_string()],
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct OutputFiles {
    pub(crate) categorized: PathBuf,
    pub(crate) hours_by_category: PathBuf,
    pub(crate) tasks_by_date: PathBuf,
}

impl Default for OutputFiles {
    fn default() -> Self {
        OutputFiles {
            categorized: PathBuf::from("timesheet-with-categories.csv"),
            hours_by_category: PathBuf::from("hours-by-category.csv"),
            tasks_by_date: PathBuf::from("hours-by-task-and-date.csv"),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct PromptConfig {
    /// Clear the terminal before each categorization question
    pub(crate) clear_screen: bool,
    /// Keep answers in a history file between runs
    pub(crate) history: bool,
}

impl Default for PromptConfig {
    fn default() -> Self {
        PromptConfig { clear_screen: true, history: true }
    }
}

impl Config {
    /// Load from the given file, or the user config file when present, or fall back to defaults.
    pub(crate) fn load(explicit_path: Option<&Path>) -> anyhow::Result<Config> {
        if let Some(path) = explicit_path {
            if !path.is_file() {
                bail!("Config file {} not found", path.display());
            }
            return Config::load_from_file(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => Config::load_from_file(&path),
            _ => Ok(Config::default()),
        }
    }

    pub(crate) fn load_from_file(path: &Path) -> anyhow::Result<Config> {
        let content = fs::read_to_string(path).with_context(|| format!("Unable to read {}", path.display()))?;
        let config = Config::from_toml(&content).with_context(|| format!("Invalid config file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub(crate) fn from_toml(content: &str) -> Result<Config, toml::de::Error> {
        toml::from_str::<Config>(content)
    }
}

pub(crate) fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

pub(crate) fn history_file() -> Option<PathBuf> {
    dirs::home_dir().map(|dir| dir.join(HISTORY_FILE))
}
