use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Tracker base URL, e.g. https://yourcompany.atlassian.net
    pub base_url: String,
    pub user: String,
    pub api_token: String,
    /// Worklog durations are rounded to the nearest bracket of this many minutes.
    #[serde(default = "default_round_minutes")]
    pub round_minutes: i64,
    /// Minimum duration ever logged, in minutes.
    #[serde(default = "default_min_log_minutes")]
    pub min_log_minutes: i64,
    /// Status name a "close" transition must land on.
    #[serde(default = "default_done_status")]
    pub done_status: String,
    /// JQL used to list open tickets assigned to the user.
    #[serde(default = "default_search_jql")]
    pub search_jql: String,
    /// Daily cutoff (HH:MM). Past this time, a start time saved on a previous
    /// day is considered stale and reset.
    #[serde(default = "default_day_cutoff")]
    pub day_cutoff: String,
    /// Path of the file holding the workday start timestamp.
    #[serde(default = "default_start_time_file")]
    pub start_time_file: String,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_round_minutes() -> i64 {
    15
}
fn default_min_log_minutes() -> i64 {
    15
}
fn default_done_status() -> String {
    "Done".to_string()
}
fn default_search_jql() -> String {
    "assignee=currentUser() AND statusCategory!=Done".to_string()
}
fn default_day_cutoff() -> String {
    "06:00".to_string()
}
fn default_start_time_file() -> String {
    Config::config_dir()
        .join("start_time")
        .to_string_lossy()
        .to_string()
}
fn default_http_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            user: String::new(),
            api_token: String::new(),
            round_minutes: default_round_minutes(),
            min_log_minutes: default_min_log_minutes(),
            done_status: default_done_status(),
            search_jql: default_search_jql(),
            day_cutoff: default_day_cutoff(),
            start_time_file: default_start_time_file(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("jiralog")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".jiralog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("jiralog.conf")
    }

    /// Load configuration from file (defaults when absent), then apply
    /// environment overrides.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &PathBuf) -> AppResult<Self> {
        let mut cfg = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("failed to parse {}: {}", path.display(), e)))?
        } else {
            Config::default()
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    /// Environment variables take precedence over the config file, so the
    /// tool works from a bare shell or a git hook without any file present.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("JIRA_BASE_URL") {
            self.base_url = v;
        }
        if let Ok(v) = env::var("JIRA_USER") {
            self.user = v;
        }
        if let Ok(v) = env::var("JIRA_API_TOKEN") {
            self.api_token = v;
        }
        if let Ok(v) = env::var("JIRA_ROUND_MINUTES") {
            if let Ok(n) = v.parse() {
                self.round_minutes = n;
            }
        }
        if let Ok(v) = env::var("JIRA_MIN_LOG_MINUTES") {
            if let Ok(n) = v.parse() {
                self.min_log_minutes = n;
            }
        }
        if let Ok(v) = env::var("JIRA_DONE_STATUS") {
            self.done_status = v;
        }
        if let Ok(v) = env::var("JIRA_SEARCH_JQL") {
            self.search_jql = v;
        }
        if let Ok(v) = env::var("JIRA_DAY_CUTOFF_TIME") {
            self.day_cutoff = v;
        }
        if let Ok(v) = env::var("START_TIME_FILE") {
            self.start_time_file = v;
        }
        if let Ok(v) = env::var("JIRA_HTTP_TIMEOUT_SECS") {
            if let Ok(n) = v.parse() {
                self.http_timeout_secs = n;
            }
        }
    }

    /// Fail early when the tracker credentials are missing.
    pub fn require_credentials(&self) -> AppResult<()> {
        if self.base_url.is_empty() || self.user.is_empty() || self.api_token.is_empty() {
            return Err(AppError::Config(
                "missing tracker credentials: set base_url, user and api_token in the config \
                 file, or JIRA_BASE_URL, JIRA_USER and JIRA_API_TOKEN in the environment"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
