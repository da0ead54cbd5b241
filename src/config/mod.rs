/// Configuration system for git-search-mcp
///
/// Supports loading from multiple sources with priority:
/// CLI args > Environment variables > Config file > Defaults
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure, built once at startup and handed to the server
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Search defaults and rendering options
    #[serde(default)]
    pub search: SearchConfig,
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Repository used when a request omits `repo_path`
    #[serde(default = "default_repo_path")]
    pub default_repo_path: String,

    /// Output cap used when a request omits `max_chars`
    #[serde(default = "default_max_chars")]
    pub default_max_chars: usize,

    /// Unchanged lines shown around each hunk
    #[serde(default = "default_context_lines")]
    pub context_lines: u32,

    /// End truncated reports with a `[truncated]` marker instead of cutting silently
    #[serde(default)]
    pub mark_truncation: bool,
}

fn default_repo_path() -> String {
    ".".to_string()
}

fn default_max_chars() -> usize {
    1000
}

fn default_context_lines() -> u32 {
    3
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_repo_path: default_repo_path(),
            default_max_chars: default_max_chars(),
            context_lines: default_context_lines(),
            mark_truncation: false,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default location or create default
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let config_path = crate::paths::PlatformPaths::default_config_path();

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            tracing::info!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.default_repo_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "search.default_repo_path".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.search.default_max_chars == 0 {
            return Err(ConfigError::InvalidValue {
                key: "search.default_max_chars".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("GIT_SEARCH_MCP_REPO_PATH") {
            self.search.default_repo_path = path;
        }

        if let Ok(max_chars) = std::env::var("GIT_SEARCH_MCP_MAX_CHARS")
            && let Ok(value) = max_chars.parse()
        {
            self.search.default_max_chars = value;
        }

        if let Ok(lines) = std::env::var("GIT_SEARCH_MCP_CONTEXT_LINES")
            && let Ok(value) = lines.parse()
        {
            self.search.context_lines = value;
        }

        if let Ok(mark) = std::env::var("GIT_SEARCH_MCP_MARK_TRUNCATION")
            && let Ok(value) = mark.parse()
        {
            self.search.mark_truncation = value;
        }
    }

    /// Build the startup configuration: explicit file (or the default location),
    /// then environment overrides, then validation
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::load_or_default()?,
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Create a new Config with defaults and environment overrides
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None)
    }
}
