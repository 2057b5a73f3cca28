//! In-memory artifact storage.

use crate::domain::{Artifact, ArtifactFilter, ArtifactId, NewArtifact};
use crate::error::Result;
use crate::ident::IdAllocator;
use crate::store::ArtifactStore;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;

/// HashMap-backed store. Ephemeral on its own; the JSONL wrapper layers
/// persistence on top of it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    artifacts: HashMap<ArtifactId, Artifact>,
    allocator: IdAllocator,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing artifacts, registering every ID with the
    /// allocator so future creates continue the sequence.
    #[must_use]
    pub fn from_artifacts(artifacts: Vec<Artifact>) -> Self {
        let mut store = Self::new();
        for artifact in artifacts {
            store.allocator.register(&artifact.id);
            store.artifacts.insert(artifact.id.clone(), artifact);
        }
        store
    }

    /// Number of artifacts in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Whether the store holds no artifacts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

#[async_trait]
impl ArtifactStore for MemoryStore {
    async fn create(&mut self, new_artifact: NewArtifact) -> Result<Artifact> {
        let id = self.allocator.allocate(new_artifact.artifact_type);
        let status = new_artifact
            .status
            .unwrap_or_else(|| new_artifact.artifact_type.default_status());
        let artifact = Artifact {
            id: id.clone(),
            artifact_type: new_artifact.artifact_type,
            status,
            title: new_artifact.title,
            owner: new_artifact.owner,
            tags: new_artifact.tags,
            updated_at: Utc::now(),
            references: Vec::new(),
        };
        self.artifacts.insert(id, artifact.clone());
        Ok(artifact)
    }

    async fn load(&self, id: &ArtifactId) -> Result<Option<Artifact>> {
        Ok(self.artifacts.get(id).cloned())
    }

    async fn save(&mut self, artifact: Artifact) -> Result<()> {
        self.allocator.register(&artifact.id);
        self.artifacts.insert(artifact.id.clone(), artifact);
        Ok(())
    }

    async fn exists(&self, id: &ArtifactId) -> Result<bool> {
        Ok(self.artifacts.contains_key(id))
    }

    async fn list(&self, filter: &ArtifactFilter) -> Result<Vec<Artifact>> {
        let mut matched: Vec<Artifact> = self
            .artifacts
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.id.cmp(&b.id));
        if let Some(limit) = filter.limit {
            matched.truncate(limit);
        }
        Ok(matched)
    }

    async fn export_all(&self) -> Result<Vec<Artifact>> {
        let mut all: Vec<Artifact> = self.artifacts.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn flush(&self) -> Result<()> {
        Ok(())
    }

    async fn reload(&mut self) -> Result<()> {
        Ok(())
    }
}
