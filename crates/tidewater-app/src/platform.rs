//! Directory resolution.

use std::path::{Path, PathBuf};

/// Errors that can occur while resolving or creating directories.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    /// A directory could not be created.
    #[error("platform I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where tidewater keeps its config file and logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Holds `tidewater.log` in debug builds.
    pub log_dir: PathBuf,
}

const APP_NAME: &str = "tidewater";

impl PlatformDirs {
    /// Resolve directories under the OS config directory (XDG on Linux,
    /// Known Folders on Windows, Library on macOS) without creating them.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NoConfigDir`] if the OS does not expose a
    /// configuration directory.
    pub fn resolve() -> Result<Self, PlatformError> {
        let base = dirs::config_dir().ok_or(PlatformError::NoConfigDir)?;
        Ok(Self::with_config_dir(&base.join(APP_NAME)))
    }

    /// Use an explicit config directory, with logs in a `logs` subdirectory.
    pub fn with_config_dir(config_dir: &Path) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
            log_dir: config_dir.join("logs"),
        }
    }

    /// Create both directories on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] if a directory cannot be created.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}
