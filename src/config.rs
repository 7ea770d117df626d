//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$QUICKCHAT_CONFIG` (environment variable)
//! 2. `~/.config/quickchat/config.toml` (Linux/macOS)
//!    `%APPDATA%\quickchat\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Where messages and drafts are persisted.
    pub storage: StorageConfig,
    /// Message composition limits.
    pub compose: ComposeConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
    /// Sender identity used when nobody is logged in.
    pub default_sender: String,
    /// Override the directory holding the message files.
    pub data_dir: Option<PathBuf>,
}

/// Persistence file names, relative to the data directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// File holding every sent message.
    pub sent_file: String,
    /// File holding stored drafts.
    pub drafts_file: String,
}

/// Message composition limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Maximum message length in characters.
    pub max_message_chars: usize,
    /// Number of digits in a generated message ID.
    pub message_id_len: usize,
    /// Messages a shell session may compose when `--quota` is not given.
    pub default_quota: usize,
}

// ── Default implementations ─────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            default_sender: "Developer".to_string(),
            data_dir: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            sent_file: "messages.json".to_string(),
            drafts_file: "stored_messages.json".to_string(),
        }
    }
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            max_message_chars: 250,
            message_id_len: 10,
            default_quota: 5,
        }
    }
}

// ── Load / save ─────────────────────────────────────────────────

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    if let Some(path) = config_file_path() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Config>(&contents) {
                    Ok(cfg) => {
                        tracing::info!(path = %path.display(), "Loaded config");
                        return cfg;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse config, using defaults"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read config file, using defaults"
                    );
                }
            }
        }
    }
    Config::default()
}

/// Save configuration to the standard location.
pub fn save_config(config: &Config) -> anyhow::Result<PathBuf> {
    let Some(path) = config_file_path() else {
        anyhow::bail!("Could not determine config file path");
    };
    save_config_to(&path, config)?;
    Ok(path)
}

/// Write `config` as TOML to `path`, creating parent directories.
pub fn save_config_to(path: &Path, config: &Config) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    tracing::info!(path = %path.display(), "Saved config");
    Ok(())
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var("QUICKCHAT_CONFIG") {
        return Some(PathBuf::from(env_path));
    }
    dirs::config_dir().map(|d| d.join("quickchat").join("config.toml"))
}

/// Return the directory holding the sent-messages and drafts files.
pub fn data_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.data_dir {
        return dir.clone();
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quickchat")
}

/// Return the directory for log files.
pub fn log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quickchat")
}
