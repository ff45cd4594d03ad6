use markstream_engine::HandlerRegistry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// How a parsed tree is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented element/text listing.
    #[default]
    Outline,
    Html,
    /// The node tree serialized as YAML.
    Yaml,
}

/// Replay settings for the streaming viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Characters revealed per tick.
    pub chunk_chars: usize,
    /// Milliseconds between ticks.
    pub tick_ms: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_chars: 3,
            tick_ms: 30,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Handler names removed from the default registry.
    pub disabled_handlers: Vec<String>,
    pub format: OutputFormat,
    pub stream: StreamConfig,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = Self::expand_path(config_path.as_ref());
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.clone(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.clone(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = Self::expand_path(config_path.as_ref());
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markstream");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// The default handler set minus `disabled_handlers`.
    pub fn registry(&self) -> HandlerRegistry {
        HandlerRegistry::default().without(self.disabled_handlers.as_slice())
    }

    /// Entries of `disabled_handlers` that name no default handler.
    pub fn unknown_handlers(&self) -> Vec<&str> {
        let known = HandlerRegistry::default();
        self.disabled_handlers
            .iter()
            .map(String::as_str)
            .filter(|name| known.get(name).is_none())
            .collect()
    }

    /// Expands `~` and environment variables, keeping the path as given when
    /// expansion fails.
    fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => PathBuf::from(expanded.as_ref()),
            Err(_) => path.to_path_buf(),
        }
    }
}
