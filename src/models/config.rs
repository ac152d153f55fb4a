//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP settings for remote report fetches
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Default filters applied when the caller does not override them
    #[serde(default)]
    pub filter: FilterConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        if !self.fetch.report_url.contains("{report_id}") {
            return Err(AppError::validation(
                "fetch.report_url must contain a {report_id} placeholder",
            ));
        }
        if self.filter.days == 0 {
            return Err(AppError::validation("filter.days must be >= 1"));
        }
        let code = &self.filter.project_code;
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(format!(
                "filter.project_code must be numeric, got {code:?}"
            )));
        }
        Ok(())
    }
}

/// HTTP client settings for the report host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Report URL template, `{report_id}` is substituted per report
    #[serde(default = "defaults::report_url")]
    pub report_url: String,
}

impl FetchConfig {
    /// URL of one report.
    pub fn report_url_for(&self, report_id: u32) -> String {
        self.report_url
            .replace("{report_id}", &report_id.to_string())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            report_url: defaults::report_url(),
        }
    }
}

/// Default collection filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Recency window in days
    #[serde(default = "defaults::days")]
    pub days: u32,

    /// Project code section to extract
    #[serde(default = "defaults::project_code")]
    pub project_code: String,

    /// Keep only permits pulled by the homeowner
    #[serde(default)]
    pub homeowner_only: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            days: defaults::days(),
            project_code: defaults::project_code(),
            homeowner_only: false,
        }
    }
}

pub(crate) mod defaults {
    // Fetch defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36"
            .into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn report_url() -> String {
        "https://www.pprbd.org/File/Report?report={report_id}".into()
    }

    // Filter defaults
    pub fn days() -> u32 {
        30
    }
    pub fn project_code() -> String {
        "101".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.fetch.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_template_without_placeholder() {
        let mut config = Config::default();
        config.fetch.report_url = "https://www.pprbd.org/File/Report".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_numeric_project_code() {
        let mut config = Config::default();
        config.filter.project_code = "10A".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [fetch]
            timeout_secs = 5

            [filter]
            project_code = "102"
            "#,
        )
        .unwrap();
        assert_eq!(config.fetch.timeout_secs, 5);
        assert!(config.fetch.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.filter.project_code, "102");
        assert_eq!(config.filter.days, 30);
    }

    #[test]
    fn report_url_substitution() {
        let fetch = FetchConfig::default();
        assert_eq!(
            fetch.report_url_for(46),
            "https://www.pprbd.org/File/Report?report=46"
        );
    }

    #[test]
    fn load_or_default_missing_file() {
        let config = Config::load_or_default("does/not/exist.toml");
        assert_eq!(config.filter.days, 30);
    }
}
