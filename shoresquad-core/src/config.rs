use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Top-level configuration stored on disk.
///
/// Credentials for the weather and map providers and the backend base URL
/// are supplied externally; nothing is hard-coded.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// API key for the weather provider (weatherapi.com).
    pub weather_api_key: Option<String>,

    /// API key for the external map provider.
    pub maps_api_key: Option<String>,

    /// Base URL of the cleanup-events backend, e.g. "https://api.shoresquad.example".
    pub backend_url: Option<String>,
}

impl Config {
    /// Weather provider API key, or a hint on how to configure one.
    pub fn weather_api_key(&self) -> Result<&str> {
        self.weather_api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No weather API key configured.\n\
                 Hint: run `shoresquad configure weather` and enter your API key."
            )
        })
    }

    /// Map provider API key, or a hint on how to configure one.
    pub fn maps_api_key(&self) -> Result<&str> {
        self.maps_api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No maps API key configured.\n\
                 Hint: run `shoresquad configure maps` and enter your API key."
            )
        })
    }

    /// Events backend base URL, or a hint on how to configure one.
    pub fn backend_url(&self) -> Result<&str> {
        self.backend_url.as_deref().ok_or_else(|| {
            anyhow!(
                "No events backend configured.\n\
                 Hint: run `shoresquad configure backend` and enter the backend URL."
            )
        })
    }

    pub fn set_weather_api_key(&mut self, key: String) {
        self.weather_api_key = Some(key);
    }

    pub fn set_maps_api_key(&mut self, key: String) {
        self.maps_api_key = Some(key);
    }

    pub fn set_backend_url(&mut self, url: String) {
        self.backend_url = Some(url.trim_end_matches('/').to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "shoresquad", "shoresquad")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.weather_api_key().unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No weather API key configured"));
        assert!(msg.contains("Hint: run `shoresquad configure weather`"));
    }

    #[test]
    fn maps_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.maps_api_key().unwrap_err();

        assert!(err.to_string().contains("shoresquad configure maps"));
    }

    #[test]
    fn backend_url_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.backend_url().unwrap_err();

        assert!(err.to_string().contains("No events backend configured"));
    }

    #[test]
    fn set_and_read_back_credentials() {
        let mut cfg = Config::default();

        cfg.set_weather_api_key("WEATHER_KEY".into());
        cfg.set_maps_api_key("MAPS_KEY".into());

        assert_eq!(cfg.weather_api_key().expect("key must exist"), "WEATHER_KEY");
        assert_eq!(cfg.maps_api_key().expect("key must exist"), "MAPS_KEY");
    }

    #[test]
    fn backend_url_trailing_slash_is_trimmed() {
        let mut cfg = Config::default();

        cfg.set_backend_url("https://api.example.org/".into());

        assert_eq!(cfg.backend_url().expect("url must exist"), "https://api.example.org");
    }
}
