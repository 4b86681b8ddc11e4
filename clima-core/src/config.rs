use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// Environment override for the API key, checked before the config file.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// allow_ip_location = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather API key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Whether the user has granted the approximate, IP-based location
    /// lookup. Re-checked on every fetch attempt; defaults to denied.
    #[serde(default)]
    pub allow_ip_location: bool,
}

impl Config {
    /// Resolve the API key: environment first, then the config file.
    pub fn resolved_api_key(&self) -> Result<String> {
        self.resolve_api_key(env::var(API_KEY_ENV).ok())
    }

    fn resolve_api_key(&self, env_key: Option<String>) -> Result<String> {
        if let Some(key) = env_key.filter(|k| !k.is_empty()) {
            return Ok(key);
        }

        self.api_key.clone().filter(|k| !k.is_empty()).ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `clima configure` first, or set {API_KEY_ENV}."
            )
        })
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
        let dirs = ProjectDirs::from("dev", "clima", "clima-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_api_key_errors_when_nothing_is_set() {
        let cfg = Config::default();
        let err = cfg.resolve_api_key(None).unwrap_err();

        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("Hint: run `clima configure`"));
    }

    #[test]
    fn resolve_api_key_prefers_the_environment() {
        let cfg = Config { api_key: Some("FILE_KEY".to_string()), allow_ip_location: false };

        let key = cfg.resolve_api_key(Some("ENV_KEY".to_string())).expect("key must resolve");
        assert_eq!(key, "ENV_KEY");
    }

    #[test]
    fn resolve_api_key_falls_back_to_the_config_file() {
        let cfg = Config { api_key: Some("FILE_KEY".to_string()), allow_ip_location: false };

        let key = cfg.resolve_api_key(None).expect("key must resolve");
        assert_eq!(key, "FILE_KEY");

        // An empty env value does not shadow the file.
        let key = cfg.resolve_api_key(Some(String::new())).expect("key must resolve");
        assert_eq!(key, "FILE_KEY");
    }

    #[test]
    fn partial_config_files_parse_with_defaults() {
        let cfg: Config = toml::from_str("api_key = \"K\"").expect("partial file must parse");

        assert_eq!(cfg.api_key.as_deref(), Some("K"));
        assert!(!cfg.allow_ip_location);
    }

    #[test]
    fn empty_config_files_parse_as_denied() {
        let cfg: Config = toml::from_str("").expect("empty file must parse");

        assert!(cfg.api_key.is_none());
        assert!(!cfg.allow_ip_location);
    }
}
