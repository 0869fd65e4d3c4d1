//! Engine configuration and environment variable loading

use crate::{LemError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Default file name of the persisted drive state
pub const DEFAULT_STATE_FILE: &str = "driver_state.json";

/// Default number of trigger records kept per drive
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

/// Configuration for a [`LemEngine`](crate::LemEngine)
///
/// The state directory is always explicit. There is no fallback location
/// derived from the home directory or the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LemConfig {
    /// Directory holding the persisted state record
    pub state_dir: PathBuf,

    /// File name of the state record inside `state_dir`
    pub state_file: String,

    /// Optional file that receives the bridge export after every write
    pub bridge_file: Option<PathBuf>,

    /// Trigger records retained per drive; reports carry at most five
    pub history_limit: usize,
}

impl LemConfig {
    /// Create a configuration rooted at `state_dir`
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
            state_file: DEFAULT_STATE_FILE.to_string(),
            bridge_file: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Use a different state file name
    pub fn with_state_file(mut self, name: impl Into<String>) -> Self {
        self.state_file = name.into();
        self
    }

    /// Mirror the bridge export into `path` after every persisted update
    pub fn with_bridge_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.bridge_file = Some(path.into());
        self
    }

    /// Set the per-drive trigger history bound (at least 1)
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    /// Full path of the persisted state record
    pub fn state_path(&self) -> PathBuf {
        self.state_dir.join(&self.state_file)
    }

    /// Build a configuration from the environment
    ///
    /// Reads `LEM_STATE_DIR` (required), `LEM_STATE_FILE`, `LEM_BRIDGE_FILE`
    /// and `LEM_HISTORY_LIMIT`. A `.env` file is loaded first when present.
    pub fn from_env() -> Result<Self> {
        load_env()?;

        let mut config = Self::new(get_required_env("LEM_STATE_DIR")?)
            .with_state_file(get_env_or("LEM_STATE_FILE", DEFAULT_STATE_FILE))
            .with_history_limit(get_env_int("LEM_HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT));

        if let Ok(bridge) = env::var("LEM_BRIDGE_FILE") {
            if !bridge.trim().is_empty() {
                config = config.with_bridge_file(bridge);
            }
        }

        Ok(config)
    }
}

/// Load environment variables from a .env file, if one exists
pub fn load_env() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::info!("Loaded environment from: {}", path.display());
            Ok(())
        }
        Err(dotenvy::Error::LineParse(line, pos)) => Err(LemError::config(format!(
            "Failed to parse .env file at line {}, position {}",
            line, pos
        ))),
        Err(dotenvy::Error::Io(_)) => {
            tracing::debug!("No .env file found - using system environment variables only");
            Ok(())
        }
        Err(e) => Err(LemError::config(format!("Failed to load .env file: {}", e))),
    }
}

/// Load environment variables from a specific file
pub fn load_env_from_path<P: AsRef<Path>>(path: P) -> Result<()> {
    dotenvy::from_path(path.as_ref()).map_err(|e| {
        LemError::config(format!(
            "Failed to load {} environment file: {}",
            path.as_ref().display(),
            e
        ))
    })
}

/// Get required environment variable
pub fn get_required_env(key: &str) -> Result<String> {
    env::var(key).map_err(|_| {
        LemError::config(format!(
            "Required environment variable '{}' is not set. \
             Check your .env file or system environment.",
            key
        ))
    })
}

/// Get optional environment variable with default
pub fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get environment variable as integer
pub fn get_env_int<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
