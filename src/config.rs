/// Configuration system: TOML-based with sensible defaults.
/// Config file: `~/.config/utf8/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Fail on the first malformed sequence instead of substituting U+FFFD.
    pub strict: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub newline: bool,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            newline: true,
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Config file path: `~/.config/utf8/config.toml`
    pub fn path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from file, falling back to defaults.
    pub fn load() -> Self {
        let path = Self::path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::from_str(&contents),
            Err(e) => {
                log::debug!("no config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse config from TOML string.
    pub fn from_str(s: &str) -> Self {
        toml::from_str(s).unwrap_or_else(|e| {
            log::warn!("invalid config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Export config as JSON, for carrying settings between machines.
    pub fn export(&self) -> std::io::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Import config from JSON.
    pub fn import(json: &str) -> std::io::Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join(".config").join("utf8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert!(!cfg.input.strict);
        assert!(cfg.output.newline);
        assert_eq!(cfg.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_empty_toml() {
        let cfg = Config::from_str("");
        assert!(!cfg.input.strict);
        assert!(cfg.output.newline);
    }

    #[test]
    fn test_parse_partial_toml() {
        let cfg = Config::from_str(r#"
            [input]
            strict = true
        "#);
        assert!(cfg.input.strict);
        // Defaults preserved for unset fields
        assert!(cfg.output.newline);
        assert_eq!(cfg.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_full_toml() {
        let cfg = Config::from_str(r#"
            [input]
            strict = true

            [output]
            newline = false
            format = "json"
        "#);
        assert!(cfg.input.strict);
        assert!(!cfg.output.newline);
        assert_eq!(cfg.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_toml_falls_back() {
        let cfg = Config::from_str("this is not valid toml {{{}}}");
        assert!(!cfg.input.strict);
        assert!(cfg.output.newline);
    }

    #[test]
    fn test_unknown_format_falls_back() {
        let cfg = Config::from_str("[output]\nformat = \"yaml\"");
        assert_eq!(cfg.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_export_import() {
        let mut cfg = Config::default();
        cfg.input.strict = true;
        cfg.output.format = OutputFormat::Json;
        let json = cfg.export().unwrap();
        assert!(json.contains("\"json\""));
        let restored = Config::import(&json).unwrap();
        assert!(restored.input.strict);
        assert_eq!(restored.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_import_invalid() {
        let err = Config::import("not json").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::Other);
    }

    #[test]
    fn test_config_path() {
        let path = Config::path();
        assert!(path.to_str().unwrap().ends_with(".config/utf8/config.toml"));
    }
}
