//! Workspace configuration for girder.
//!
//! A girder workspace is marked by a `.girder/` directory holding a
//! `config.yaml` and the artifact data file. This module handles loading and
//! saving that configuration and locating the workspace root from any
//! subdirectory.

use crate::error::{ConfigError, Result};
use crate::store::StoreBackend;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the girder directory
pub const GIRDER_DIR_NAME: &str = ".girder";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the artifact data file
pub const ARTIFACTS_FILE_NAME: &str = "artifacts.jsonl";

/// Maximum directory depth to traverse when searching for the workspace root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for girder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GirderConfig {
    /// Storage configuration
    pub storage: StorageConfig,
}

/// Storage configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Storage backend type ("jsonl" or "memory")
    pub backend: String,

    /// Path to the data file, relative to the workspace root
    pub data_file: String,
}

impl GirderConfig {
    /// Create the configuration `girder init` writes: a JSONL backend with
    /// the data file inside `.girder/`.
    #[must_use]
    pub fn jsonl_default() -> Self {
        Self {
            storage: StorageConfig {
                backend: "jsonl".to_string(),
                data_file: format!("{}/{}", GIRDER_DIR_NAME, ARTIFACTS_FILE_NAME),
            },
        }
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Invalid(e.to_string()).into())
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Invalid(format!("YAML error: {}", e)))?;
        fs::write(path, content).await?;
        Ok(())
    }
}

impl Default for GirderConfig {
    fn default() -> Self {
        Self::jsonl_default()
    }
}

impl StorageConfig {
    /// Resolve this section into a concrete store backend.
    ///
    /// Relative `data_file` paths are resolved against `root`, the directory
    /// containing `.girder/`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an unknown backend name.
    pub fn to_backend(&self, root: &Path) -> Result<StoreBackend> {
        match self.backend.as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "jsonl" => Ok(StoreBackend::Jsonl(root.join(&self.data_file))),
            other => {
                Err(ConfigError::Invalid(format!("unknown storage backend '{other}'")).into())
            }
        }
    }
}

/// Check if a directory has been initialized as a girder workspace.
///
/// Returns `true` if the `.girder/` directory exists.
#[must_use]
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(GIRDER_DIR_NAME).exists()
}

/// Find the workspace root by searching up the directory tree.
///
/// Starts from the given directory and traverses parent directories until a
/// `.girder/` directory is found, the filesystem root is reached, or the
/// maximum traversal depth is exceeded.
///
/// Returns `Some(path)` with the directory containing `.girder/`, or `None`
/// if no workspace is found within the depth limit.
#[must_use]
pub fn find_girder_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(GIRDER_DIR_NAME).exists() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
