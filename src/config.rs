//! Editor settings, persisted as `config.yaml` in the config dir

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Failure reading or writing a settings file
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "cannot access settings: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "malformed settings: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings shared by every editor instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Joins term searches into the serialized string
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Validation message; `%s` is replaced with the allowed tokens
    #[serde(default = "default_choose_template")]
    pub choose_template: String,
    /// Shown in the trailing input while there are no terms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Send completion requests to listeners
    #[serde(default = "default_true")]
    pub term_completion: bool,
    /// Mark the input as required on submit while there are no terms
    #[serde(default)]
    pub manage_required: bool,
}

fn default_separator() -> String {
    " ".to_string()
}

fn default_choose_template() -> String {
    "Please type one of: %s".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            choose_template: default_choose_template(),
            placeholder: None,
            term_completion: true,
            manage_required: false,
        }
    }
}

impl EditorConfig {
    /// Settings from `config.yaml` in the config dir; defaults when it is absent or broken
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file().filter(|p| p.is_file()) else {
            tracing::debug!("no config.yaml, using default settings");
            return Self::default();
        };

        Self::load_from(&path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), "ignoring config: {}", e);
            Self::default()
        })
    }

    /// Settings from an explicit file; missing keys take their defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;
        let config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(config)
    }

    /// Write to `config.yaml` in the config dir
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| ConfigError::IoError("no home or config directory".to_string()))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write to `path`, creating missing parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |e: std::io::Error| ConfigError::IoError(format!("{}: {}", path.display(), e));

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(io_error)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        std::fs::write(path, yaml).map_err(io_error)?;

        tracing::info!(path = %path.display(), "saved settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: EditorConfig = serde_yaml::from_str("placeholder: Search\n").unwrap();
        assert_eq!(config.placeholder.as_deref(), Some("Search"));
        assert_eq!(config.separator, " ");
        assert_eq!(config.choose_template, "Please type one of: %s");
        assert!(config.term_completion);
        assert!(!config.manage_required);
    }

    #[test]
    fn test_empty_placeholder_not_serialized() {
        let yaml = serde_yaml::to_string(&EditorConfig::default()).unwrap();
        assert!(!yaml.contains("placeholder"));
        assert!(yaml.contains("term_completion: true"));
    }
}
