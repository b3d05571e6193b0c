//! Path management for actual-tools
//!
//! ## Path Resolution Order
//!
//! 1. `ACTUAL_CONFIG_DIR` environment variable (if set)
//! 2. `$HOME/.config/actual`

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::ActualError;

/// Environment variable that overrides the base directory
pub const CONFIG_DIR_ENV: &str = "ACTUAL_CONFIG_DIR";

/// Manages all paths used by actual-tools
#[derive(Debug, Clone)]
pub struct ActualPaths {
    base_dir: PathBuf,
}

impl ActualPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no override is set and the home directory cannot
    /// be determined.
    pub fn new() -> Result<Self, ActualError> {
        let base_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create ActualPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Base directory (~/.config/actual/ or the override)
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path to credentials.json
    pub fn credentials_file(&self) -> PathBuf {
        self.base_dir.join("credentials.json")
    }

    /// Cache directory owned by the budget session
    pub fn cache_dir(&self) -> PathBuf {
        self.base_dir.join("cache")
    }

    /// Create the cache directory (recursive, idempotent)
    pub fn ensure_cache_dir(&self) -> Result<PathBuf, ActualError> {
        let cache_dir = self.cache_dir();
        std::fs::create_dir_all(&cache_dir).map_err(|e| {
            ActualError::Io(format!(
                "Failed to create cache directory {}: {}",
                cache_dir.display(),
                e
            ))
        })?;
        Ok(cache_dir)
    }
}

fn resolve_default_path() -> Result<PathBuf, ActualError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| ActualError::Config("Could not determine home directory".into()))?;
    Ok(dirs.home_dir().join(".config").join("actual"))
}
