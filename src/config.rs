use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings, loaded from `MOVIEFLIX_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Base URL of the recommendation backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Quiet period after the last keystroke before a search fires
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Minimum trimmed query length that triggers a search
    #[serde(default = "default_min_search_length")]
    pub min_search_length: usize,

    /// Delay between an interaction write and the profile reload
    #[serde(default = "default_profile_refresh_delay_ms")]
    pub profile_refresh_delay_ms: u64,

    /// Number of personalized recommendations requested
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: u32,

    /// Where the persistent user id lives (defaults to the data dir)
    #[serde(default)]
    pub user_id_file: Option<PathBuf>,

    /// Log destination (defaults to the cache dir)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_api_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_search_debounce_ms() -> u64 {
    500
}

fn default_min_search_length() -> usize {
    2
}

fn default_profile_refresh_delay_ms() -> u64 {
    500
}

fn default_recommendation_limit() -> u32 {
    15
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            search_debounce_ms: default_search_debounce_ms(),
            min_search_length: default_min_search_length(),
            profile_refresh_delay_ms: default_profile_refresh_delay_ms(),
            recommendation_limit: default_recommendation_limit(),
            user_id_file: None,
            log_file: None,
        }
    }
}

impl Settings {
    /// Load settings from `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let settings = envy::prefixed("MOVIEFLIX_").from_env::<Settings>()?;
        settings.validate()
    }

    pub fn validate(mut self) -> Result<Self, ConfigError> {
        let trimmed = self.api_url.trim().trim_end_matches('/').to_string();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::ApiUrl(self.api_url));
        }
        self.api_url = trimmed;
        Ok(self)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn profile_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.profile_refresh_delay_ms)
    }

    pub fn user_id_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.user_id_file {
            return Ok(path.clone());
        }
        Ok(project_dirs()?.data_dir().join("movie_app_user_id"))
    }

    pub fn log_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.log_file {
            return Ok(path.clone());
        }
        Ok(project_dirs()?.cache_dir().join("movieflix.log"))
    }
}

fn project_dirs() -> Result<directories::ProjectDirs, ConfigError> {
    directories::ProjectDirs::from("com", "movieflix", "movieflix").ok_or(ConfigError::NoHomeDir)
}
