use crate::api_client::{DEFAULT_LOGO_URL, DEFAULT_SEARCH_URL};
use crate::autocomplete::DEFAULT_DEBOUNCE_MS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SEARCH_URL_ENV: &str = "COLLEGE_SEARCH_URL";
pub const LOGO_URL_ENV: &str = "COLLEGE_LOGO_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoints: EndpointConfig,
    pub behavior: BehaviorConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Base URL of the universities directory (`/search` is appended)
    pub search_url: String,

    /// Base URL of the logo service (`/<domain>` is appended)
    pub logo_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Quiet period after the last keystroke before searching
    pub debounce_ms: u64,

    /// How long the event loop waits for a key before redrawing
    pub tick_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use Unicode glyphs for the spinner
    pub use_glyphs: bool,

    /// Open the log pane on startup
    pub show_logs: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is not set
    pub level: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            logo_url: DEFAULT_LOGO_URL.to_string(),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            tick_ms: 50,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            use_glyphs: true,
            show_logs: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults when
    /// no file exists. Environment overrides are applied last.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides(
            std::env::var(SEARCH_URL_ENV).ok(),
            std::env::var(LOGO_URL_ENV).ok(),
        );
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self, search_url: Option<String>, logo_url: Option<String>) {
        if let Some(url) = search_url.filter(|u| !u.is_empty()) {
            self.endpoints.search_url = url;
        }
        if let Some(url) = logo_url.filter(|u| !u.is_empty()) {
            self.endpoints.logo_url = url;
        }
    }

    /// Save config to the given path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("college-picker").join("config.toml"))
    }

    /// Default config file with comments
    pub fn create_default_with_comments() -> String {
        format!(
            r#"# College Picker Configuration File
# Location: ~/.config/college-picker/config.toml (Linux)

[endpoints]
# Universities directory; requests go to <search_url>/search?name=<text>
# Overridden by the {search_env} environment variable
search_url = "{search_url}"

# Logo service; logos are looked up at <logo_url>/<domain>
# Overridden by the {logo_env} environment variable
logo_url = "{logo_url}"

[behavior]
# Wait this long after the last keystroke before searching
debounce_ms = {debounce_ms}

# Event loop tick in milliseconds
tick_ms = 50

[display]
# Set to false for an ASCII spinner
use_glyphs = true

# Show the log pane on startup (toggle with F12)
show_logs = false

[logging]
# Log level when RUST_LOG is not set: "error", "warn", "info", "debug", "trace"
level = "info"
"#,
            search_env = SEARCH_URL_ENV,
            logo_env = LOGO_URL_ENV,
            search_url = DEFAULT_SEARCH_URL,
            logo_url = DEFAULT_LOGO_URL,
            debounce_ms = DEFAULT_DEBOUNCE_MS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.behavior.debounce_ms, 300);
        assert_eq!(config.endpoints.search_url, "http://universities.hipolabs.com");
        assert_eq!(config.endpoints.logo_url, "https://logo.clearbit.com");
        assert!(config.display.use_glyphs);
    }

    #[test]
    fn test_commented_default_parses_to_default() {
        let parsed: Config = toml::from_str(&Config::create_default_with_comments()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[behavior]\ndebounce_ms = 150\n").unwrap();
        assert_eq!(parsed.behavior.debounce_ms, 150);
        assert_eq!(parsed.behavior.tick_ms, 50);
        assert_eq!(parsed.endpoints, EndpointConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env_overrides(Some("http://localhost:9000".to_string()), Some(String::new()));
        assert_eq!(config.endpoints.search_url, "http://localhost:9000");
        assert_eq!(config.endpoints.logo_url, "https://logo.clearbit.com");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.display.show_logs = true;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[behavior]\ndebounce_ms = \"soon\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
