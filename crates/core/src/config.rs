//! Layout and display configuration.
//!
//! `AppConfig` is read from a TOML file with `[layout]`, `[display]` and
//! `[content]` tables. A missing file or missing keys fall back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Geometry of the level map coordinate space, in pixels.
///
/// Values are taken as-is: non-positive spacing or a zero track height
/// give degenerate but well-defined layouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Horizontal distance between consecutive node centres.
    #[serde(default = "default_node_spacing", alias = "node_spacing")]
    pub node_spacing: f64,
    /// Offset of the first node from the left edge, mirrored on the right.
    #[serde(default = "default_leading_margin", alias = "leading_margin")]
    pub leading_margin: f64,
    #[serde(default = "default_track_height", alias = "track_height")]
    pub track_height: f64,
}

fn default_node_spacing() -> f64 {
    220.0
}

fn default_leading_margin() -> f64 {
    150.0
}

fn default_track_height() -> f64 {
    500.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_spacing: default_node_spacing(),
            leading_margin: default_leading_margin(),
            track_height: default_track_height(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

/// Whole-application configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppConfig {
    pub layout: LayoutConfig,
    pub theme: ThemeMode,
    /// Level content file; `None` uses the built-in levels.
    pub levels: Option<PathBuf>,
}

// ── TOML schema ──

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    layout: LayoutConfig,
    #[serde(default)]
    display: TomlDisplay,
    #[serde(default)]
    content: TomlContent,
}

#[derive(Deserialize, Debug, Default)]
struct TomlDisplay {
    #[serde(default)]
    theme: ThemeMode,
}

#[derive(Deserialize, Debug, Default)]
struct TomlContent {
    levels: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: TomlConfig = toml::from_str(text)?;
        Ok(Self {
            layout: raw.layout,
            theme: raw.display.theme,
            levels: raw.content.levels,
        })
    }

    /// Load from `path`. Relative level paths are resolved against the
    /// config file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;
        if let Some(levels) = config.levels.take() {
            let resolved = match path.parent() {
                Some(dir) if levels.is_relative() => dir.join(levels),
                _ => levels,
            };
            config.levels = Some(resolved);
        }
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Like [`AppConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_map_geometry() {
        let c = LayoutConfig::default();
        assert_eq!(c.node_spacing, 220.0);
        assert_eq!(c.leading_margin, 150.0);
        assert_eq!(c.track_height, 500.0);
    }

    #[test]
    fn empty_toml_is_default() {
        let config = AppConfig::from_toml_str("").expect("empty config");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_layout_keeps_other_defaults() {
        let text = "[layout]\nnode_spacing = 180\n\n[display]\ntheme = \"light\"\n";
        let config = AppConfig::from_toml_str(text).expect("valid config");
        assert_eq!(config.layout.node_spacing, 180.0);
        assert_eq!(config.layout.leading_margin, 150.0);
        assert_eq!(config.theme, ThemeMode::Light);
    }

    #[test]
    fn camel_case_keys_accepted() {
        let config =
            AppConfig::from_toml_str("[layout]\ntrackHeight = 300.0\n").expect("valid config");
        assert_eq!(config.layout.track_height, 300.0);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let result = AppConfig::from_toml_str("[layout\nnode_spacing = ");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn layout_from_json() {
        let json = r#"{"nodeSpacing": 100, "leadingMargin": 20}"#;
        let config: LayoutConfig = serde_json::from_str(json).expect("deserialize");
        assert_eq!(config.node_spacing, 100.0);
        assert_eq!(config.leading_margin, 20.0);
        assert_eq!(config.track_height, 500.0);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = Path::new("/nonexistent/tidemap-test/tidemap.toml");
        let config = AppConfig::load_or_default(path).expect("missing file is not an error");
        assert_eq!(config, AppConfig::default());
    }
}
