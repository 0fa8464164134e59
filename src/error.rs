//! Error types for the toolkit

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the run loop, backends and config loading
#[derive(Debug, Error)]
pub enum Error {
    /// Terminal backend failed (init, flush, cursor control)
    #[error("terminal backend error: {0}")]
    Backend(#[from] io::Error),

    #[error("failed to read config from {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
