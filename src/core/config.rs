//! Configuration management for Swan.
//!
//! Handles loading and saving configuration from TOML files, and flattening
//! the `[swan]` section into the namespaced settings the host exposes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Settings;
use crate::extension::NAME_PLACEHOLDER;
use crate::host::LogLevel;
use crate::{SwanError, SwanResult, CONFIG_NAMESPACE, DEFAULT_DOCS_URL};

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "SWAN_CONFIG";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "SWAN_DATA_DIR";

/// Local config file name.
pub const LOCAL_CONFIG_FILE: &str = ".swan.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings exposed to the extension under the `swan` namespace
    pub swan: SwanSettings,

    /// Documentation link settings
    pub docs: DocsConfig,

    /// Project scaffolding settings
    pub scaffold: ScaffoldConfig,
}

/// The user-facing `swan.*` settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwanSettings {
    /// Whether editor auto-completion for Swan files is enabled
    pub enable_auto_complete: bool,

    /// Diagnostic log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Documentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// URL opened by `swan.openDocs`
    pub url: String,
}

/// Scaffolding settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Command sent to the terminal; `{name}` is replaced by the project name
    pub command: String,

    /// Name of the terminal the command runs in
    pub terminal_name: String,

    /// Prompt shown when asking for the project name
    pub prompt: String,

    /// Example project name shown in the prompt
    pub placeholder: String,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Looks for config in:
    /// 1. the file named by `SWAN_CONFIG`
    /// 2. `.swan.toml` in current directory
    /// 3. `~/.config/swan/config.toml`
    /// 4. Falls back to defaults
    pub fn load() -> SwanResult<Self> {
        match Self::path() {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Path of the config file [`load`](Self::load) would read, if any.
    pub fn path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Some(local_config);
        }

        Self::config_dir().map(|dir| dir.join("config.toml")).filter(|path| path.exists())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> SwanResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| SwanError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Path [`save`](Self::save) writes to: the file named by `SWAN_CONFIG`,
    /// else `config.toml` in the config directory.
    pub fn save_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Save configuration to [`save_path`](Self::save_path).
    pub fn save(&self) -> SwanResult<PathBuf> {
        let config_path = Self::save_path()
            .ok_or_else(|| SwanError::Config("Could not determine config directory".to_string()))?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save configuration to a specific file, creating its directory.
    pub fn save_to(&self, path: &Path) -> SwanResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> SwanResult<String> {
        toml::to_string_pretty(self).map_err(|e| SwanError::Config(e.to_string()))
    }

    /// Check values the extension relies on.
    pub fn validate(&self) -> SwanResult<()> {
        if LogLevel::parse(&self.swan.log_level).is_none() {
            return Err(SwanError::Config(format!("unknown log level '{}'", self.swan.log_level)));
        }

        if !self.scaffold.command.contains(NAME_PLACEHOLDER) {
            return Err(SwanError::Config(format!(
                "scaffold command must contain {NAME_PLACEHOLDER}: '{}'",
                self.scaffold.command
            )));
        }

        if self.docs.url.trim().is_empty() {
            return Err(SwanError::Config("docs url is empty".to_string()));
        }

        Ok(())
    }

    /// Flatten the `[swan]` section into host settings.
    pub fn to_settings(&self) -> Settings {
        Settings::new()
            .with(format!("{CONFIG_NAMESPACE}.enableAutoComplete"), self.swan.enable_auto_complete)
            .with(format!("{CONFIG_NAMESPACE}.logLevel"), self.swan.log_level.clone())
    }

    /// Get the config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("swan"))
    }

    /// Get the data directory path (for persisted extension state).
    pub fn data_dir() -> Option<PathBuf> {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            return Some(PathBuf::from(dir));
        }
        dirs::data_dir().map(|d| d.join("swan"))
    }
}

impl Default for SwanSettings {
    fn default() -> Self {
        Self { enable_auto_complete: true, log_level: "info".to_string() }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self { url: DEFAULT_DOCS_URL.to_string() }
    }
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            command: "npx create-swan-app {name}".to_string(),
            terminal_name: "Swan".to_string(),
            prompt: "Enter a name for your Swan project".to_string(),
            placeholder: "my-swan-app".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.swan.enable_auto_complete);
        assert_eq!(config.swan.log_level, "info");
        assert_eq!(config.docs.url, DEFAULT_DOCS_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_to_settings() {
        let settings = Config::default().to_settings();
        let section = settings.section("swan");
        assert!(section.get("enableAutoComplete", false));
        assert_eq!(section.get("logLevel", String::new()), "info");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[swan]\nlog_level = \"debug\"\n").unwrap();
        assert_eq!(config.swan.log_level, "debug");
        assert!(config.swan.enable_auto_complete);
        assert_eq!(config.scaffold, ScaffoldConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.swan.log_level = "loud".to_string();
        assert!(matches!(config.validate(), Err(SwanError::Config(_))));

        let mut config = Config::default();
        config.scaffold.command = "npx create-swan-app".to_string();
        assert!(matches!(config.validate(), Err(SwanError::Config(_))));

        let mut config = Config::default();
        config.docs.url = " ".to_string();
        assert!(matches!(config.validate(), Err(SwanError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[docs]\nurl = \"https://docs.example.com\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.docs.url, "https://docs.example.com");

        std::fs::write(&path, "[swan\n").unwrap();
        assert!(matches!(Config::load_from_file(&path), Err(SwanError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[swan]\nlog_level = \"warn\"\n").unwrap();

        std::env::set_var(CONFIG_ENV, &path);
        std::env::set_var(DATA_DIR_ENV, dir.path());

        assert_eq!(Config::path(), Some(path.clone()));
        assert_eq!(Config::load().unwrap().swan.log_level, "warn");
        assert_eq!(Config::data_dir(), Some(dir.path().to_path_buf()));

        std::env::remove_var(CONFIG_ENV);
        std::env::remove_var(DATA_DIR_ENV);
    }

    #[test]
    fn test_save_to_creates_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.swan.log_level = "debug".to_string();
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }

    #[test]
    #[serial]
    fn test_save_honours_config_env() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("swan.toml");
        std::env::set_var(CONFIG_ENV, &path);

        assert_eq!(Config::save_path(), Some(path.clone()));
        assert_eq!(Config::default().save().unwrap(), path);
        assert!(path.exists());

        std::env::remove_var(CONFIG_ENV);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let parsed: Config = toml::from_str(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
