use anyhow::Context;
use mobile_ui_editor::{SessionOptions, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "mobile-ui.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Logical canvas width in points
    #[serde(default = "default_canvas_width")]
    pub canvas_width: f64,

    /// Logical canvas height in points
    #[serde(default = "default_canvas_height")]
    pub canvas_height: f64,

    /// Deepest object nesting shown by the property form
    #[serde(default = "default_form_max_depth")]
    pub form_max_depth: usize,
}

fn default_canvas_width() -> f64 {
    DEFAULT_CANVAS_WIDTH
}

fn default_canvas_height() -> f64 {
    DEFAULT_CANVAS_HEIGHT
}

fn default_form_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Config {
    /// Load config from an explicit path, or from `cwd` when it exists there
    pub fn load(cwd: &str, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match explicit {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME),
        };

        if explicit.is_some() || config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Cannot read config {}", config_path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid config {}", config_path.display()))?;
            tracing::debug!(path = %config_path.display(), ?config, "config loaded");
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            form_max_depth: self.form_max_depth,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            form_max_depth: default_form_max_depth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "canvasWidth": 414,
            "canvasHeight": 896,
            "formMaxDepth": 5
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.canvas_width, 414.0);
        assert_eq!(config.canvas_height, 896.0);
        assert_eq!(config.form_max_depth, 5);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"formMaxDepth": 1}"#).unwrap();
        assert_eq!(config.canvas_width, 375.0);
        assert_eq!(config.canvas_height, 812.0);
        assert_eq!(config.session_options().form_max_depth, 1);
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load(&dir.path().display().to_string(), None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(Config::load(".", Some(missing.as_path())).is_err());
    }
}
