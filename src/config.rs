use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub run_loop: RunLoopConfig,
    pub overlay: OverlayConfig,
    pub log_display: LogDisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunLoopConfig {
    /// Minimum time between two render passes
    pub frame_interval_ms: u64,
    /// Sleep at the end of every loop iteration
    pub idle_sleep_ms: u64,
}

/// Loading overlay drawn over the widget tree while the screen is busy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub width: u16,
    pub height: u16,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogDisplayConfig {
    /// Maximum retained log lines
    pub capacity: usize,
}

impl Default for RunLoopConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            idle_sleep_ms: 1,
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 5,
            title: "SYSTEM".to_string(),
        }
    }
}

impl Default for LogDisplayConfig {
    fn default() -> Self {
        Self { capacity: 1000 }
    }
}

impl RunLoopConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn idle_sleep(&self) -> Duration {
        Duration::from_millis(self.idle_sleep_ms)
    }
}

impl Config {
    /// Default config location (`~/.config/lattice-tui/config.toml`)
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lattice-tui")
            .join("config.toml")
    }

    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
            Self::parse(&content).map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            })
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
