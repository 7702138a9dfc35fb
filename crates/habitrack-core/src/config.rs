//! Configuration management for habitrack.
//!
//! Loads configuration from ${HABITRACK_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `[api] base_url`.
pub const BASE_URL_ENV: &str = "HABITRACK_API_BASE_URL";

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// This ensures new comments/sections from the template are always present,
/// while preserving user's customized values.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for habitrack configuration and data directories.
    //!
    //! HABITRACK_HOME resolution order:
    //! 1. HABITRACK_HOME environment variable (if set)
    //! 2. ~/.config/habitrack (default)

    use std::path::PathBuf;

    /// Returns the habitrack home directory.
    ///
    /// Checks HABITRACK_HOME env var first, falls back to ~/.config/habitrack
    /// (or a relative `.habitrack` when no home directory can be determined).
    pub fn habitrack_home() -> PathBuf {
        if let Ok(home) = std::env::var("HABITRACK_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".habitrack"),
            |h| h.join(".config").join("habitrack"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        habitrack_home().join("config.toml")
    }

    /// Returns the path to the persisted client session (token, username, points).
    pub fn session_path() -> PathBuf {
        habitrack_home().join("session.json")
    }

    /// Returns the directory that receives log files.
    pub fn logs_dir() -> PathBuf {
        habitrack_home().join("logs")
    }
}

/// API server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the habit tracker API.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Config::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Point increments applied by the daily completion flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsConfig {
    /// Awarded for each habit marked done.
    pub habit_done: i64,
    /// Awarded once when the last undone habit of the day is marked done.
    pub all_done_bonus: i64,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            habit_done: 3,
            all_done_bonus: 5,
        }
    }
}

/// Alert banner timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub hide_after_ms: u64,
    pub clear_after_ms: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            hide_after_ms: 3000,
            clear_after_ms: 3500,
        }
    }
}

impl AlertConfig {
    pub fn hide_after(&self) -> Duration {
        Duration::from_millis(self.hide_after_ms)
    }

    /// Clear delay, never shorter than the hide delay.
    pub fn clear_after(&self) -> Duration {
        Duration::from_millis(self.clear_after_ms.max(self.hide_after_ms))
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub points: PointsConfig,
    pub alert: AlertConfig,
}

impl Config {
    const DEFAULT_BASE_URL: &str = "http://localhost:8080";

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Returns the API base URL to use.
    ///
    /// Resolution order:
    /// 1. `HABITRACK_API_BASE_URL` env var (if set and non-empty)
    /// 2. `[api] base_url` (if non-empty)
    /// 3. Default: `http://localhost:8080`
    ///
    /// A trailing slash is stripped.
    ///
    /// # Errors
    /// Returns an error if the chosen URL does not parse.
    pub fn effective_base_url(&self) -> Result<String> {
        let from_env = std::env::var(BASE_URL_ENV).ok();
        resolve_base_url(from_env.as_deref(), &self.api.base_url)
    }

    /// Saves only the `[api] base_url` field to a specific config file path.
    ///
    /// Creates the file with default template if it doesn't exist.
    /// If file exists, merges user values into the latest template.
    ///
    /// # Errors
    /// Returns an error if `base_url` is not a valid URL or the file cannot be
    /// read, parsed, or written.
    pub fn save_base_url_to(path: &Path, base_url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let base_url = resolve_base_url(None, base_url)?;

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["api"]["base_url"] = value(base_url.as_str());

        Self::write_config(path, &doc.to_string())
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Generates a fresh config TOML from Rust defaults.
    ///
    /// Used by `xtask update-default-config` to keep `default_config.toml`
    /// in sync with `Config::default()`. The embedded template provides the
    /// structure and comments; generated values overwrite its values.
    ///
    /// # Errors
    /// Returns an error if serialization or template parsing fails.
    pub fn generate() -> Result<String> {
        use toml_edit::DocumentMut;

        let generated_toml = toml::to_string(&Config::default())
            .context("Failed to serialize default config to TOML")?;

        let mut doc: DocumentMut = default_config_template()
            .parse()
            .context("Failed to parse default config template")?;

        let generated_doc: DocumentMut = generated_toml
            .parse()
            .context("Failed to parse generated config")?;

        merge_items(doc.as_table_mut(), generated_doc.as_table());

        Ok(doc.to_string())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

/// Picks env over config over default, validates, and strips a trailing slash.
fn resolve_base_url(env_value: Option<&str>, config_value: &str) -> Result<String> {
    let chosen = env_value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| Some(config_value.trim()).filter(|s| !s.is_empty()))
        .unwrap_or(Config::DEFAULT_BASE_URL);

    url::Url::parse(chosen).with_context(|| format!("Invalid API base URL: {chosen}"))?;
    Ok(chosen.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.points.habit_done, 3);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "[points]\nhabit_done = 10\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.points.habit_done, 10);
        assert_eq!(config.points.all_done_bonus, 5);
        assert_eq!(config.api.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# habitrack Configuration"));
        assert!(contents.contains("habit_done = 3"));
        assert_eq!(Config::load_from(&config_path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_generate_matches_template_values() {
        let generated = Config::generate().unwrap();
        let parsed: Config = toml::from_str(&generated).unwrap();
        assert_eq!(parsed, Config::default());
        assert!(generated.contains("# Points awarded when a single habit is marked done."));
    }

    #[test]
    fn test_save_base_url_preserves_other_values() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[points]\nall_done_bonus = 20\n").unwrap();

        Config::save_base_url_to(&config_path, "https://habits.example.com").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.api.base_url, "https://habits.example.com");
        assert_eq!(config.points.all_done_bonus, 20);
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# Base URL of the habit tracker API server."));
    }

    #[test]
    fn test_save_base_url_rejects_invalid_url() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        let err = Config::save_base_url_to(&config_path, "not a url").unwrap_err();
        assert!(err.to_string().contains("Invalid API base URL"));
        assert!(!config_path.exists());
    }

    #[test]
    fn test_base_url_env_wins_over_config() {
        let url = resolve_base_url(Some("http://env.example:9000/"), "http://cfg.example").unwrap();
        assert_eq!(url, "http://env.example:9000");
    }

    #[test]
    fn test_base_url_blank_falls_back_to_default() {
        let url = resolve_base_url(Some("   "), "  ").unwrap();
        assert_eq!(url, "http://localhost:8080");
    }

    #[test]
    fn test_base_url_invalid_is_error() {
        assert!(resolve_base_url(None, "not a url").is_err());
    }

    #[test]
    fn test_alert_clear_never_precedes_hide() {
        let alert = AlertConfig {
            hide_after_ms: 4000,
            clear_after_ms: 1000,
        };
        assert_eq!(alert.clear_after(), alert.hide_after());
    }
}
