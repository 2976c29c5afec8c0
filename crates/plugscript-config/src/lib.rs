//! Configuration for the plugscript CLI
//!
//! Settings live in a small TOML file. The location is resolved from the
//! `PLUGSCRIPT_CONFIG` environment variable, then from a pointer file next to
//! the default location, then from the platform config directory.

pub mod tools;

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV: &str = "PLUGSCRIPT_CONFIG";
pub const CONFIG_FILE_NAME: &str = "plugscript.toml";
pub const POINTER_FILE_NAME: &str = ".plugscript_config_path";

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_SERVER_JAR: &str = "spigot.jar";
pub const DEFAULT_JSON_JAR: &str = "json-simple.jar";

/// Keys accepted by `config get` / `config set`
pub const KNOWN_KEYS: &[&str] = &["output-dir", "server-jar", "json-jar", "javac-path", "jar-path"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unknown config key: {0}. Supported keys: {keys}", keys = KNOWN_KEYS.join(", "))]
    UnknownKey(String),

    #[error("Tool '{name}' not found: {reason}")]
    ToolNotFound { name: String, reason: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_jar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_jar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javac_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jar_path: Option<String>,
}

impl Config {
    /// Default config file location for this platform
    pub fn default_path() -> PathBuf {
        #[cfg(not(target_os = "windows"))]
        let base = dirs::home_dir().map(|home| home.join(".config"));

        #[cfg(target_os = "windows")]
        let base = dirs::config_dir();

        base.unwrap_or_else(|| PathBuf::from("."))
            .join("plugscript")
            .join(CONFIG_FILE_NAME)
    }

    /// Pointer file that redirects the config location
    pub fn pointer_path() -> PathBuf {
        Self::default_path()
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(POINTER_FILE_NAME)
    }

    pub fn path() -> PathBuf {
        // Explicit override for tests and isolated runs
        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        let pointer = Self::pointer_path();
        if pointer.exists() {
            if let Ok(contents) = fs::read_to_string(&pointer) {
                let trimmed = contents.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
        }

        Self::default_path()
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Point future loads at `new_path` by writing the pointer file
    pub fn set_path(new_path: &str) -> Result<(), ConfigError> {
        let pointer = Self::pointer_path();
        if let Some(parent) = pointer.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&pointer, new_path.as_bytes())?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "output-dir" => self.output_dir.clone(),
            "server-jar" => self.server_jar.clone(),
            "json-jar" => self.json_jar.clone(),
            "javac-path" => self.javac_path.clone(),
            "jar-path" => self.jar_path.clone(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<(), ConfigError> {
        match key {
            "output-dir" => self.output_dir = Some(value),
            "server-jar" => self.server_jar = Some(value),
            "json-jar" => self.json_jar = Some(value),
            "javac-path" => self.javac_path = Some(value),
            "jar-path" => self.jar_path = Some(value),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.values_iter().is_empty()
    }

    pub fn values_iter(&self) -> Vec<(&'static str, String)> {
        KNOWN_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(self.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR))
    }

    pub fn server_jar(&self) -> PathBuf {
        PathBuf::from(self.server_jar.as_deref().unwrap_or(DEFAULT_SERVER_JAR))
    }

    pub fn json_jar(&self) -> PathBuf {
        PathBuf::from(self.json_jar.as_deref().unwrap_or(DEFAULT_JSON_JAR))
    }

    /// Resolve the Java compiler, preferring the configured path
    pub fn javac(&self) -> Result<PathBuf, ConfigError> {
        tools::resolve_tool("javac", self.javac_path.as_deref())
    }

    /// Resolve the jar archiver, preferring the configured path
    pub fn jar(&self) -> Result<PathBuf, ConfigError> {
        tools::resolve_tool("jar", self.jar_path.as_deref())
    }
}
