//! Artifact store abstraction.
//!
//! This module provides the store trait the graph engine is written against
//! and a factory for the concrete backends:
//!
//! - **Memory**: ephemeral `HashMap`-backed storage
//! - **JSONL**: the memory store wrapped with JSON Lines file persistence
//!
//! The trait is object-safe and used as `Box<dyn ArtifactStore>` so the
//! engine components never know which backend they run on. The store is the
//! single source of truth for artifacts and their reference arrays; link,
//! graph, and impact code re-reads it on every operation rather than caching
//! anything.
//!
//! # Example
//!
//! ```no_run
//! use girder::domain::{ArtifactType, NewArtifact};
//! use girder::store::{StoreBackend, create_store};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let mut store = create_store(StoreBackend::Memory).await?;
//!
//!     let artifact = store
//!         .create(NewArtifact {
//!             artifact_type: ArtifactType::Rfc,
//!             title: "Modular auth tokens".to_string(),
//!             owner: None,
//!             tags: vec![],
//!             status: None,
//!         })
//!         .await?;
//!     println!("Created {}", artifact.id);
//!
//!     Ok(())
//! }
//! ```

use crate::domain::{Artifact, ArtifactFilter, ArtifactId, NewArtifact};
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub mod jsonl;
pub mod memory;

pub use jsonl::LoadWarning;
pub use memory::MemoryStore;

/// Core storage trait for artifact management.
///
/// Implementations must be `Send + Sync` so the trait object can cross async
/// boundaries.
///
/// # Method Categories
///
/// - **Records**: `create`, `load`, `save`, `exists`
/// - **Queries**: `list`, `export_all`
/// - **Persistence**: `flush`, `reload`
///
/// Reads on unknown IDs return `Ok(None)` or empty collections; it is the
/// caller's business whether a missing artifact is an error. There is no
/// delete: artifacts leave the graph by status change, never by removal.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    // ========== Records ==========

    /// Create a new artifact, allocating the next sequential ID for its type.
    ///
    /// The artifact starts with no references, the type's default status
    /// unless one is given, and a fresh `updated_at` stamp.
    async fn create(&mut self, new_artifact: NewArtifact) -> Result<Artifact>;

    /// Load an artifact by ID.
    ///
    /// Returns `None` if the artifact doesn't exist.
    async fn load(&self, id: &ArtifactId) -> Result<Option<Artifact>>;

    /// Upsert an artifact by its ID.
    ///
    /// The ID is registered with the allocator so later `create` calls never
    /// collide with records written from outside.
    async fn save(&mut self, artifact: Artifact) -> Result<()>;

    /// Whether an artifact with this ID exists.
    async fn exists(&self, id: &ArtifactId) -> Result<bool>;

    // ========== Queries ==========

    /// List artifacts matching the given filter, sorted by ID.
    ///
    /// The default filter matches everything; incoming-link scans depend on
    /// that.
    async fn list(&self, filter: &ArtifactFilter) -> Result<Vec<Artifact>>;

    /// Export all artifacts sorted by ID, suitable for JSONL export or
    /// backup.
    async fn export_all(&self) -> Result<Vec<Artifact>>;

    // ========== Persistence ==========

    /// Persist current state.
    ///
    /// Takes `&self` so a flush can happen from shared references; for the
    /// memory backend this is a no-op, for the JSONL backend it writes the
    /// data file atomically.
    async fn flush(&self) -> Result<()>;

    /// Discard unsaved state and re-read the backing file.
    ///
    /// No-op for the memory backend.
    async fn reload(&mut self) -> Result<()>;
}

/// Storage backend configuration.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// In-memory storage (ephemeral).
    Memory,

    /// JSONL file storage (persistent).
    Jsonl(PathBuf),
}

impl StoreBackend {
    /// Returns the data file path for file-based backends.
    #[must_use]
    pub fn data_path(&self) -> Option<&Path> {
        match self {
            StoreBackend::Jsonl(path) => Some(path),
            StoreBackend::Memory => None,
        }
    }
}

/// Wrapper that adds JSONL file persistence to the memory store.
///
/// Record operations delegate to the inner store; `flush` writes every
/// artifact to the JSONL file atomically and `reload` rebuilds the inner
/// store from disk.
struct JsonlBackedStore {
    inner: Box<dyn ArtifactStore>,
    path: PathBuf,
}

#[async_trait]
impl ArtifactStore for JsonlBackedStore {
    async fn create(&mut self, new_artifact: NewArtifact) -> Result<Artifact> {
        self.inner.create(new_artifact).await
    }

    async fn load(&self, id: &ArtifactId) -> Result<Option<Artifact>> {
        self.inner.load(id).await
    }

    async fn save(&mut self, artifact: Artifact) -> Result<()> {
        self.inner.save(artifact).await
    }

    async fn exists(&self, id: &ArtifactId) -> Result<bool> {
        self.inner.exists(id).await
    }

    async fn list(&self, filter: &ArtifactFilter) -> Result<Vec<Artifact>> {
        self.inner.list(filter).await
    }

    async fn export_all(&self) -> Result<Vec<Artifact>> {
        self.inner.export_all().await
    }

    async fn flush(&self) -> Result<()> {
        jsonl::save_to_jsonl(self.inner.as_ref(), &self.path).await
    }

    async fn reload(&mut self) -> Result<()> {
        if self.path.exists() {
            let (store, warnings) = jsonl::load_from_jsonl(&self.path).await?;
            for warning in &warnings {
                tracing::warn!(warning = ?warning, "JSONL reload warning");
            }
            self.inner = store;
        } else {
            // File is gone; reset to empty storage.
            self.inner = Box::new(MemoryStore::new());
        }
        Ok(())
    }
}

/// Create a store instance for the given backend.
///
/// # Errors
///
/// Returns an error if the JSONL backend's data file exists but cannot be
/// read.
pub async fn create_store(backend: StoreBackend) -> Result<Box<dyn ArtifactStore>> {
    match backend {
        StoreBackend::Memory => Ok(Box::new(MemoryStore::new())),
        StoreBackend::Jsonl(path) => {
            let inner: Box<dyn ArtifactStore> = if path.exists() {
                let (store, warnings) = jsonl::load_from_jsonl(&path).await?;
                // Log warnings but continue; the store is still usable.
                for warning in &warnings {
                    tracing::warn!(warning = ?warning, "JSONL load warning");
                }
                store
            } else {
                // First run; start empty and let flush create the file.
                Box::new(MemoryStore::new())
            };
            Ok(Box::new(JsonlBackedStore { inner, path }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArtifactStatus, ArtifactType, ArtifactUpdate};
    use tempfile::TempDir;

    fn new_rfc(title: &str) -> NewArtifact {
        NewArtifact {
            artifact_type: ArtifactType::Rfc,
            title: title.to_string(),
            owner: None,
            tags: vec![],
            status: None,
        }
    }

    async fn apply_update(
        store: &mut Box<dyn ArtifactStore>,
        id: &ArtifactId,
        update: ArtifactUpdate,
    ) {
        let mut artifact = store.load(id).await.unwrap().unwrap();
        artifact.apply_update(update);
        artifact.touch();
        store.save(artifact).await.unwrap();
    }

    #[tokio::test]
    async fn trait_object_usage() {
        let mut store: Box<dyn ArtifactStore> = Box::new(MemoryStore::new());

        let artifact = store.create(new_rfc("First")).await.unwrap();
        assert_eq!(artifact.id.as_str(), "RFC-0001");
        assert_eq!(artifact.status, ArtifactStatus::Draft);

        let loaded = store.load(&artifact.id).await.unwrap();
        assert!(loaded.is_some());
        assert!(store.exists(&artifact.id).await.unwrap());
        assert!(!store.exists(&ArtifactId::new("RFC-9999")).await.unwrap());
    }

    #[tokio::test]
    async fn jsonl_backend_persists_through_flush() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("artifacts.jsonl");

        let mut store = create_store(StoreBackend::Jsonl(path.clone())).await.unwrap();
        let created = store.create(new_rfc("Persisted")).await.unwrap();
        store.flush().await.unwrap();

        // A fresh store built from the same file sees the artifact.
        let reopened = create_store(StoreBackend::Jsonl(path)).await.unwrap();
        let loaded = reopened.load(&created.id).await.unwrap().unwrap();
        assert_eq!(loaded.title, "Persisted");
    }

    #[tokio::test]
    async fn jsonl_reload_restores_disk_state() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("artifacts.jsonl");

        let mut store = create_store(StoreBackend::Jsonl(path)).await.unwrap();
        let created = store.create(new_rfc("Original Title")).await.unwrap();
        store.flush().await.unwrap();

        // Modify in memory without flushing.
        apply_update(
            &mut store,
            &created.id,
            ArtifactUpdate {
                title: Some("Modified Title".to_string()),
                ..Default::default()
            },
        )
        .await;
        let before = store.load(&created.id).await.unwrap().unwrap();
        assert_eq!(before.title, "Modified Title");

        store.reload().await.unwrap();

        let after = store.load(&created.id).await.unwrap().unwrap();
        assert_eq!(after.title, "Original Title");
    }

    #[tokio::test]
    async fn jsonl_reload_with_missing_file_resets() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("artifacts.jsonl");

        let mut store = create_store(StoreBackend::Jsonl(path.clone())).await.unwrap();
        let created = store.create(new_rfc("Gone after reload")).await.unwrap();
        store.flush().await.unwrap();

        std::fs::remove_file(&path).unwrap();
        store.reload().await.unwrap();

        assert!(store.load(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn memory_reload_is_noop() {
        let mut store = create_store(StoreBackend::Memory).await.unwrap();
        let created = store.create(new_rfc("Survives reload")).await.unwrap();

        store.reload().await.unwrap();

        assert!(store.load(&created.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn ids_continue_after_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("artifacts.jsonl");

        let mut store = create_store(StoreBackend::Jsonl(path.clone())).await.unwrap();
        store.create(new_rfc("First")).await.unwrap();
        store.create(new_rfc("Second")).await.unwrap();
        store.flush().await.unwrap();

        let mut reopened = create_store(StoreBackend::Jsonl(path)).await.unwrap();
        let third = reopened.create(new_rfc("Third")).await.unwrap();
        assert_eq!(third.id.as_str(), "RFC-0003");
    }
}
