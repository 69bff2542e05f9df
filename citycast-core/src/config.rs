use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Current-weather endpoint used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Environment variable that carries the provider credential.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.openweathermap.org/data/2.5/weather"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl Config {
    /// Load config from the platform config dir, or an empty default on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config dir, creating parent directories as needed.
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

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "citycast", "citycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }
}

/// Process-wide settings, resolved once at startup and injected into the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
}

impl Settings {
    /// Credential: environment > config file > empty. Base URL: override > config file > default.
    ///
    /// A missing credential is not an error here; the provider rejects it.
    pub fn resolve(
        config: &Config,
        env_api_key: Option<String>,
        base_url_override: Option<String>,
    ) -> Self {
        let api_key = env_api_key
            .filter(|k| !k.is_empty())
            .or_else(|| config.api_key.clone())
            .unwrap_or_default();

        let base_url = base_url_override
            .or_else(|| config.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self { api_key, base_url }
    }

    /// Load the config file and read the credential from the environment.
    pub fn from_env(base_url_override: Option<String>) -> Result<Self> {
        Self::from_env_at(&Config::config_file_path()?, base_url_override)
    }

    /// Same as [`Settings::from_env`], with the config file at `path`.
    pub fn from_env_at(path: &Path, base_url_override: Option<String>) -> Result<Self> {
        let config = Config::load_from(path)?;
        let env_key = std::env::var(API_KEY_ENV).ok();
        Ok(Self::resolve(&config, env_key, base_url_override))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_key_wins_over_file() {
        let cfg = Config { api_key: Some("FILE_KEY".into()), base_url: None };
        let settings = Settings::resolve(&cfg, Some("ENV_KEY".into()), None);

        assert_eq!(settings.api_key, "ENV_KEY");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn empty_env_key_falls_back_to_file() {
        let cfg = Config { api_key: Some("FILE_KEY".into()), base_url: None };
        let settings = Settings::resolve(&cfg, Some(String::new()), None);

        assert_eq!(settings.api_key, "FILE_KEY");
    }

    #[test]
    fn missing_key_is_not_validated() {
        let settings = Settings::resolve(&Config::default(), None, None);
        assert_eq!(settings.api_key, "");
    }

    #[test]
    fn base_url_override_wins() {
        let cfg = Config { api_key: None, base_url: Some("http://file".into()) };

        let settings = Settings::resolve(&cfg, None, Some("http://cli".into()));
        assert_eq!(settings.base_url, "http://cli");

        let settings = Settings::resolve(&cfg, None, None);
        assert_eq!(settings.base_url, "http://file");
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("nope.toml")).expect("load default");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("OPEN_KEY".into());
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.api_key.as_deref(), Some("OPEN_KEY"));
        assert_eq!(loaded.base_url, None);
    }

    #[test]
    fn from_env_at_reads_file_and_environment() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = \"FILE_KEY\"\nbase_url = \"http://file\"\n")
            .expect("write");

        let settings = Settings::from_env_at(&path, None).expect("settings");

        let expected_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| "FILE_KEY".to_string());
        assert_eq!(settings.api_key, expected_key);
        assert_eq!(settings.base_url, "http://file");

        let settings = Settings::from_env_at(&path, Some("http://cli".into())).expect("settings");
        assert_eq!(settings.base_url, "http://cli");
    }

    #[test]
    fn from_env_at_propagates_bad_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = 42").expect("write");

        let err = Settings::from_env_at(&path, None).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn garbage_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [").expect("write");

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
