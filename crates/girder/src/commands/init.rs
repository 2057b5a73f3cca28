//! Implementation of the `init` command.
//!
//! This module handles initialization of a new girder workspace, creating
//! the `.girder/` directory structure with configuration and data files.

use crate::config::{
    GirderConfig, ARTIFACTS_FILE_NAME, CONFIG_FILE_NAME, GIRDER_DIR_NAME,
};
use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the gitignore file within .girder
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created girder directory
    pub girder_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the created artifacts file
    pub artifacts_file: PathBuf,
    /// Path to the created gitignore file
    pub gitignore_file: PathBuf,
}

/// Initialize a new girder workspace in the given directory.
///
/// Creates `.girder/` with a `config.yaml`, an empty `artifacts.jsonl` and a
/// `.gitignore` covering the atomic writer's temp files.
///
/// # Errors
///
/// Returns an error if:
/// - The `.girder/` directory already exists
/// - File system operations fail
pub async fn init(base_dir: &Path) -> Result<InitResult> {
    let girder_dir = base_dir.join(GIRDER_DIR_NAME);

    // Check if already initialized
    if girder_dir.exists() {
        return Err(ConfigError::AlreadyInitialized(girder_dir.display().to_string()).into());
    }

    // Create the .girder directory
    fs::create_dir_all(&girder_dir).await?;

    // Create config.yaml
    let config_file = girder_dir.join(CONFIG_FILE_NAME);
    let config = GirderConfig::jsonl_default();
    config.save(&config_file).await?;

    // Create empty artifacts.jsonl
    let artifacts_file = girder_dir.join(ARTIFACTS_FILE_NAME);
    fs::write(&artifacts_file, "").await?;

    // Create .gitignore inside .girder
    let gitignore_file = girder_dir.join(GITIGNORE_FILE_NAME);
    let gitignore_content = "\
# Leftover temp files from interrupted atomic writes
# The artifacts.jsonl file itself should be tracked for collaboration
*.tmp
";
    fs::write(&gitignore_file, gitignore_content).await?;

    tracing::debug!(dir = %girder_dir.display(), "Initialized girder workspace");

    Ok(InitResult {
        girder_dir,
        config_file,
        artifacts_file,
        gitignore_file,
    })
}
