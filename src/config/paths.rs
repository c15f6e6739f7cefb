//! Path management for fileseal
//!
//! ## Path Resolution Order
//!
//! 1. `FILESEAL_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (e.g. `~/.config/fileseal` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::SealError;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "FILESEAL_CONFIG_DIR";

/// Manages the paths used by fileseal
#[derive(Debug, Clone)]
pub struct FilesealPaths {
    /// Base directory for configuration
    base_dir: PathBuf,
}

impl FilesealPaths {
    /// Create a new FilesealPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, SealError> {
        let base_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("com", "Allpasoft", "fileseal")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    SealError::Config("Could not determine a configuration directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create FilesealPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the config directory exists
    pub fn ensure_directories(&self) -> Result<(), SealError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SealError::Io(format!("Failed to create config directory: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FilesealPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let paths = FilesealPaths::with_base_dir(nested.clone());

        paths.ensure_directories().unwrap();
        assert!(nested.is_dir());
    }
}
