//! Startup configuration
//!
//! Secrets come from the environment, optionally seeded by a JSON file named
//! in `INFOBOT_CONFIG`. Environment values win over the file.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const CONFIG_FILE_VAR: &str = "INFOBOT_CONFIG";

const DEFAULT_TELEGRAM_BASE: &str = "https://api.telegram.org";
const DEFAULT_WEATHER_BASE: &str = "https://api.openweathermap.org";
const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_POLL_SECS: u64 = 30;
const DEFAULT_WEATHER_TIMEOUT_SECS: u64 = 15;
const DEFAULT_ASK_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(&'static str),
    #[error("Failed to read config file {path}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone)]
pub struct TelegramConfig {
    pub token: String,
    pub api_base: String,
    pub poll_timeout: Duration,
}

#[derive(Clone)]
pub struct WeatherConfig {
    pub api_key: String,
    pub api_base: String,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct AskConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub weather: WeatherConfig,
    pub ask: AskConfig,
}

// Secrets are deliberately left out
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("telegram_api_base", &self.telegram.api_base)
            .field("poll_timeout", &self.telegram.poll_timeout)
            .field("weather_api_base", &self.weather.api_base)
            .field("weather_timeout", &self.weather.timeout)
            .field("openai_api_base", &self.ask.api_base)
            .field("model", &self.ask.model)
            .field("ask_timeout", &self.ask.timeout)
            .finish_non_exhaustive()
    }
}

/// Shape of the optional JSON secrets file
#[derive(Debug, Default, Deserialize)]
struct FileSecrets {
    #[serde(rename = "TelegramBotToken")]
    telegram_bot_token: Option<String>,
    #[serde(rename = "WeatherApiKey")]
    weather_api_key: Option<String>,
    #[serde(rename = "OpenAIApiKey")]
    openai_api_key: Option<String>,
}

impl FileSecrets {
    fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::File {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let file = match var(CONFIG_FILE_VAR) {
            Some(path) => FileSecrets::load(PathBuf::from(path))?,
            None => FileSecrets::default(),
        };

        let secret = |name: &'static str, from_file: Option<String>| {
            var(name)
                .or(from_file.filter(|v| !v.trim().is_empty()))
                .ok_or(ConfigError::Missing(name))
        };
        let token = secret("TELEGRAM_BOT_TOKEN", file.telegram_bot_token)?;
        let weather_key = secret("WEATHER_API_KEY", file.weather_api_key)?;
        let openai_key = secret("OPENAI_API_KEY", file.openai_api_key)?;

        let secs = |name: &'static str, default: u64| -> Result<Duration, ConfigError> {
            match var(name) {
                Some(value) => {
                    let parsed = value.trim().parse::<u64>();
                    parsed
                        .map(Duration::from_secs)
                        .map_err(|_| ConfigError::Invalid { name, value })
                }
                None => Ok(Duration::from_secs(default)),
            }
        };

        Ok(Self {
            telegram: TelegramConfig {
                token,
                api_base: var("TELEGRAM_API_BASE")
                    .unwrap_or_else(|| DEFAULT_TELEGRAM_BASE.to_string()),
                poll_timeout: secs("TELEGRAM_POLL_TIMEOUT", DEFAULT_POLL_SECS)?,
            },
            weather: WeatherConfig {
                api_key: weather_key,
                api_base: var("WEATHER_API_BASE")
                    .unwrap_or_else(|| DEFAULT_WEATHER_BASE.to_string()),
                timeout: secs("WEATHER_TIMEOUT", DEFAULT_WEATHER_TIMEOUT_SECS)?,
            },
            ask: AskConfig {
                api_key: openai_key,
                api_base: var("OPENAI_API_BASE")
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE.to_string()),
                model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                timeout: secs("OPENAI_TIMEOUT", DEFAULT_ASK_TIMEOUT_SECS)?,
            },
        })
    }
}
