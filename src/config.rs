use std::env;
use std::path::PathBuf;

use crate::constants::DEFAULT_LOG_FILE;

pub const LOG_FILE_VAR: &str = "RATE_CONVERTER_LOG_FILE";
pub const CONSOLE_VAR: &str = "RATE_CONVERTER_CONSOLE";

/// Runtime settings that are not part of the conversion itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Debug-level log file
    pub log_file: PathBuf,
    /// Whether progress is echoed to stdout
    pub console: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            console: true,
        }
    }
}

impl Config {
    /// Read settings from the environment (call `dotenv().ok()` first to
    /// pick up a `.env` file)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_file: lookup(LOG_FILE_VAR)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
            console: lookup(CONSOLE_VAR)
                .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "off" | "no"))
                .unwrap_or(defaults.console),
        }
    }

    /// A log file given on the command line wins over the environment
    pub fn with_log_file(mut self, log_file: Option<PathBuf>) -> Self {
        if let Some(path) = log_file {
            self.log_file = path;
        }
        self
    }
}
