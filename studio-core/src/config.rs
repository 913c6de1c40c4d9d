use std::{
    env::{self, VarError},
    fs::File,
    path::PathBuf,
    time::Duration,
};

use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_NAME: &str = "WatchWish Studio";
const CONFIG_FILENAME: &str = "config.json";
const API_BASE_ENV_VAR: &str = "STUDIO_API_BASE";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Origin the dashboard API lives under, without a trailing slash.
    pub api_base: String,
    pub timeout_secs: u64,
    pub fetch_threads: usize,
    pub page_size: usize,
    pub top_limit: usize,
    pub cache_capacity: usize,
    pub health_interval_secs: u64,
    /// Opaque credential sent as `X-CSRFToken` with the simulate action.
    pub csrf_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 5,
            fetch_threads: 4,
            page_size: 12,
            top_limit: 10,
            cache_capacity: 64,
            health_interval_secs: 10,
            csrf_token: None,
        }
    }
}

impl Config {
    fn app_dirs() -> Option<AppDirs> {
        const USE_XDG_ON_MACOS: bool = false;

        AppDirs::new(Some(APP_NAME), USE_XDG_ON_MACOS)
    }

    pub fn config_dir() -> Option<PathBuf> {
        Self::app_dirs().map(|dirs| dirs.config_dir)
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILENAME))
    }

    /// Read the config file, if there is one, and apply environment overrides.
    pub fn load() -> Result<Option<Config>, ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        let override_base = Self::api_base_override();
        let mut config = if let Ok(file) = File::open(&path) {
            log::info!("loading config: {:?}", &path);
            serde_json::from_reader::<_, Config>(file)?
        } else if override_base.is_some() {
            Config::default()
        } else {
            return Ok(None);
        };
        if let Some(api_base) = override_base {
            config.api_base = api_base;
        }
        Ok(Some(config))
    }

    /// Like `load`, but never fails: errors are logged and defaults are used.
    pub fn load_or_default() -> Config {
        match Self::load() {
            Ok(config) => config.unwrap_or_default(),
            Err(err) => {
                log::error!("failed to load config, using defaults: {err}");
                Config::default()
            }
        }
    }

    fn api_base_override() -> Option<String> {
        env::var(API_BASE_ENV_VAR).map_or_else(
            |err| match err {
                VarError::NotPresent => None,
                VarError::NotUnicode(_) => {
                    log::error!("{API_BASE_ENV_VAR} is not a valid unicode");
                    None
                }
            },
            |url| Some(url.trim_end_matches('/').to_string()),
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs.max(1))
    }
}
