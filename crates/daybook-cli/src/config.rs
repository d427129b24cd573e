use std::path::PathBuf;

use daybook_core::models::TaskPriority;
use daybook_core::views::UPCOMING_DAYS;
use figment::{providers::{Env, Format, Serialized, Toml}, Figment};
use serde::{Deserialize, Serialize};

/// Name of the optional config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "daybook.toml";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the stored data files
    pub data_dir: PathBuf,
    /// Days after today shown in the upcoming list
    pub upcoming_days: u32,
    /// Filter used by `list` until one has been chosen and remembered
    pub default_priority: Option<TaskPriority>,
    /// strftime pattern for dates in tables and messages
    pub date_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".daybook"),
            upcoming_days: UPCOMING_DAYS,
            default_priority: None,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed("DAYBOOK_"))
    }

    /// Formats `date` with the configured pattern.
    pub fn format_date(&self, date: chrono::NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }
}
