//! Application context for CLI command execution.
//!
//! This module provides the `App` struct that manages store lifecycle and
//! provides a context for executing CLI commands.
//!
//! # Example
//!
//! ```no_run
//! use girder::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     // Execute commands using app...
//!     Ok(())
//! }
//! ```

use crate::config::{find_girder_root, GirderConfig, CONFIG_FILE_NAME, GIRDER_DIR_NAME};
use crate::error::{ConfigError, Result};
use crate::store::{create_store, ArtifactStore};
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
///
/// Manages store initialization and lifecycle. The store is loaded from the
/// workspace's configured backend on creation.
pub struct App {
    /// The artifact store (trait object for polymorphism)
    store: Box<dyn ArtifactStore>,

    /// Path to the girder directory (.girder)
    girder_dir: PathBuf,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("girder_dir", &self.girder_dir)
            .field("store", &"<dyn ArtifactStore>")
            .finish()
    }
}

impl App {
    /// Create an App instance from the given working directory.
    ///
    /// Searches up the directory tree to find a `.girder/` directory, loads
    /// configuration, and initializes the store.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No girder workspace is found in the directory tree
    /// - Configuration cannot be loaded
    /// - Store initialization fails
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        // Find the workspace root
        let root_dir = find_girder_root(working_dir).ok_or(ConfigError::NotInitialized)?;

        let girder_dir = root_dir.join(GIRDER_DIR_NAME);
        let config_path = girder_dir.join(CONFIG_FILE_NAME);

        // Load configuration
        let config = GirderConfig::load(&config_path).await?;

        // Create the store based on configuration
        let backend = config.storage.to_backend(&root_dir)?;
        let store = create_store(backend).await?;

        Ok(Self { store, girder_dir })
    }

    /// Get a mutable reference to the store.
    pub fn store_mut(&mut self) -> &mut dyn ArtifactStore {
        self.store.as_mut()
    }

    /// Get an immutable reference to the store.
    #[must_use]
    pub fn store(&self) -> &dyn ArtifactStore {
        self.store.as_ref()
    }

    /// Get the path to the girder directory.
    #[must_use]
    pub fn girder_dir(&self) -> &Path {
        &self.girder_dir
    }

    /// Persist store state to the configured backend.
    ///
    /// This should be called after any mutating operations.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub async fn save(&self) -> Result<()> {
        self.store.flush().await
    }
}
