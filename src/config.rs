//! Configuration handling
//!
//! The site configuration lives in `config.json` under the platform config
//! directory. Every key is optional; missing keys fall back to the site's
//! defaults. `SITEFORM_SITE_URL` overrides the configured site root.

use crate::controller::SubmitTiming;
use crate::i18n::Locale;
use crate::state::FormSchema;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding `site_url`
pub const SITE_URL_ENV: &str = "SITEFORM_SITE_URL";

/// Errors while loading or saving the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Site configuration for the form client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root of the static site; the endpoint and thank-you page resolve against it
    pub site_url: String,
    /// Form endpoint, relative to `site_url`
    pub endpoint: String,
    /// Page shown after a successful submission
    pub thank_you_path: String,
    pub locale: Locale,
    pub notification_duration_ms: u64,
    pub notification_fade_ms: u64,
    pub submit_delay_ms: u64,
    pub redirect_delay_ms: u64,
    pub request_timeout_ms: u64,
    pub forms: Vec<FormSchema>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_url: "http://127.0.0.1:8080/".to_string(),
            endpoint: "process.php".to_string(),
            thank_you_path: "thank_you.html".to_string(),
            locale: Locale::default(),
            notification_duration_ms: 5000,
            notification_fade_ms: 150,
            submit_delay_ms: 800,
            redirect_delay_ms: 1000,
            request_timeout_ms: 15_000,
            forms: vec![FormSchema::contact()],
        }
    }
}

impl SiteConfig {
    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "siteform", "siteform")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SiteConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(io_err)
    }

    /// Apply the site URL override from the environment
    pub fn with_env_overrides(self) -> Self {
        let site_url = std::env::var(SITE_URL_ENV).ok();
        self.with_site_url(site_url)
    }

    /// Replace the site URL when an override is given
    pub fn with_site_url(mut self, site_url: Option<String>) -> Self {
        if let Some(url) = site_url.filter(|u| !u.trim().is_empty()) {
            self.site_url = url;
        }
        self
    }

    /// Reject configurations the form layer cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.forms.is_empty() {
            return Err(ConfigError::Invalid("at least one form is required".into()));
        }
        for form in &self.forms {
            if form.fields.is_empty() {
                return Err(ConfigError::Invalid(format!("form '{}' has no fields", form.id)));
            }
            if let Some(field) = form.fields.iter().find(|f| f.name.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "form '{}' has a field without a name (label '{}')",
                    form.id, field.label
                )));
            }
        }
        Ok(())
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_duration_ms)
    }

    pub fn notification_fade(&self) -> Duration {
        Duration::from_millis(self.notification_fade_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Delays and destination of the submission flow
    pub fn submit_timing(&self) -> SubmitTiming {
        SubmitTiming {
            submit_delay: Duration::from_millis(self.submit_delay_ms),
            redirect_delay: Duration::from_millis(self.redirect_delay_ms),
            thank_you_path: self.thank_you_path.clone(),
        }
    }
}
