//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Upper bound the vacancies endpoint accepts for `per_page`.
pub const MAX_PER_PAGE: u32 = 100;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Vacancies endpoint and query settings
    #[serde(default)]
    pub api: ApiConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api.base_url)?;
        if self.api.per_page == 0 || self.api.per_page > MAX_PER_PAGE {
            return Err(AppError::validation(format!(
                "api.per_page must be within 1..={MAX_PER_PAGE}"
            )));
        }
        if parse_month(&self.api.month).is_none() {
            return Err(AppError::validation(format!(
                "api.month '{}' is not in YYYY-MM form",
                self.api.month
            )));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == Some(0) {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.output.path.as_os_str().is_empty() {
            return Err(AppError::validation("output.path is empty"));
        }
        Ok(())
    }
}

/// Parse a `YYYY-MM` string into the first day of that month.
pub fn parse_month(month: &str) -> Option<NaiveDate> {
    if month.len() != 7 {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()
}

/// Vacancies endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Full URL of the vacancies search endpoint
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Items requested per page
    #[serde(default = "defaults::per_page")]
    pub per_page: u32,

    /// Specialization filter sent with every request
    #[serde(default = "defaults::specialization")]
    pub specialization: u32,

    /// `YYYY-MM` prefix of `date_from`/`date_to`.
    ///
    /// Pinned rather than taken from the clock; runs outside this month query
    /// the wrong dates and are warned about.
    #[serde(default = "defaults::month")]
    pub month: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            per_page: defaults::per_page(),
            specialization: defaults::specialization(),
            month: defaults::month(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds; unset means wait indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: None,
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Destination CSV file, truncated on every run
    #[serde(default = "defaults::output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: defaults::output_path(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn base_url() -> String {
        "https://api.hh.ru/vacancies".into()
    }
    pub fn per_page() -> u32 {
        100
    }
    pub fn specialization() -> u32 {
        1
    }
    pub fn month() -> String {
        "2022-12".into()
    }

    pub fn user_agent() -> String {
        concat!("vacancies/", env!("CARGO_PKG_VERSION")).into()
    }

    pub fn output_path() -> PathBuf {
        PathBuf::from("vacancies.csv")
    }
}
