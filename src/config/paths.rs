//! Path management for overhead-cli
//!
//! ## Path Resolution Order
//!
//! 1. `OVERHEAD_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/overhead-cli` or `~/.config/overhead-cli`
//! 3. Windows: `%APPDATA%\overhead-cli`

use std::path::PathBuf;

use crate::error::CostError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "OVERHEAD_CLI_DATA_DIR";

/// Manages all paths used by overhead-cli
#[derive(Debug, Clone)]
pub struct OverheadPaths {
    /// Base directory for all overhead-cli data
    base_dir: PathBuf,
}

impl OverheadPaths {
    /// Create a new OverheadPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, CostError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create OverheadPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/overhead-cli/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/overhead-cli/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to costs.json
    pub fn costs_file(&self) -> PathBuf {
        self.data_dir().join("costs.json")
    }

    /// Get the path to allocation.json (settings and last snapshot)
    pub fn allocation_file(&self) -> PathBuf {
        self.data_dir().join("allocation.json")
    }

    /// Files whose changes should trigger a recomputation
    pub fn watched_files(&self) -> [PathBuf; 2] {
        [self.costs_file(), self.allocation_file()]
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), CostError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CostError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| CostError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if overhead-cli has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, CostError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                CostError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("overhead-cli"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, CostError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| CostError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("overhead-cli"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OverheadPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(DATA_DIR_ENV, custom_path);
        let paths = OverheadPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());
        env::remove_var(DATA_DIR_ENV);
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OverheadPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OverheadPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.costs_file(),
            temp_dir.path().join("data").join("costs.json")
        );
        assert_eq!(paths.watched_files()[1], paths.allocation_file());
    }
}
