use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_CITIES_URL: &str = concat!(
    "https://gist.githubusercontent.com/Stronger197/764f9886a1e8392ddcae2521437d5a3b/raw/",
    "65164ea1af958c75c81a7f0221bead610590448e/cities.json"
);
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_ERROR_MESSAGE: &str =
    "Something went wrong. Check your connection and try again.";

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "OPEN_WEATHER_MAP_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// cities_url = "https://..."
/// weather_url = "https://api.openweathermap.org/data/2.5/weather"
/// error_message = "Что-то пошло не так"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OpenWeatherMap `appid`.
    pub api_key: Option<String>,
    pub cities_url: String,
    pub weather_url: String,
    /// Text shown on screen for any failed fetch.
    pub error_message: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            cities_url: DEFAULT_CITIES_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    ///
    /// The API key from the environment wins over the stored one.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;

        if let Ok(key) = env::var(API_KEY_ENV) {
            cfg.apply_api_key_override(Some(key));
        }

        Ok(cfg)
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "city-weather", "city-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Blank values are ignored so an empty variable doesn't wipe a stored key.
    pub fn apply_api_key_override(&mut self, key: Option<String>) {
        if let Some(key) = key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
        {
            self.api_key = Some(key);
        }
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Returns the API key, erroring with a hint when none is configured.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(missing_api_key)
    }
}

pub(crate) fn missing_api_key() -> anyhow::Error {
    anyhow!(
        "No OpenWeatherMap API key configured.\n\
         Hint: run `city-weather configure` or set {API_KEY_ENV}."
    )
}
