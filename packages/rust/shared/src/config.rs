//! Application configuration for briefparse.
//!
//! User config lives at `~/.briefparse/briefparse.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BriefParseError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "briefparse.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".briefparse";

// ---------------------------------------------------------------------------
// Config structs (matching briefparse.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Page-fetch stub settings.
    #[serde(default)]
    pub notion: NotionConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// CSV file written by `export` when `--out` is not given.
    #[serde(default = "default_export_path")]
    pub export_path: String,

    /// Source label attached to plain-text extractions.
    #[serde(default = "default_text_source")]
    pub text_source: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            export_path: default_export_path(),
            text_source: default_text_source(),
        }
    }
}

fn default_export_path() -> String {
    "projects.csv".into()
}
fn default_text_source() -> String {
    "text".into()
}

/// `[notion]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotionConfig {
    /// File whose content the fetch stub returns instead of the built-in page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_path: Option<String>,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.briefparse/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| BriefParseError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.briefparse/briefparse.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| BriefParseError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        BriefParseError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| BriefParseError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| BriefParseError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| BriefParseError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("export_path"));
        assert!(toml_str.contains("projects.csv"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.text_source, "text");
        assert!(parsed.notion.sample_path.is_none());
    }

    #[test]
    fn config_with_notion_sample() {
        let toml_str = r#"
[defaults]
export_path = "/tmp/out.csv"

[notion]
sample_path = "fixtures/briefs/notion-page.md"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.defaults.export_path, "/tmp/out.csv");
        assert_eq!(config.defaults.text_source, "text");
        assert_eq!(
            config.notion.sample_path.as_deref(),
            Some("fixtures/briefs/notion-page.md")
        );
    }

    #[test]
    fn load_config_from_missing_file_is_io_error() {
        let err = load_config_from(Path::new("/definitely/not/here/briefparse.toml"))
            .unwrap_err();
        assert!(matches!(err, BriefParseError::Io { .. }));
    }
}
