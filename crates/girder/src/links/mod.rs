//! Bidirectional link maintenance.
//!
//! Links are stored as one [`Reference`] on each endpoint: the source holds
//! a reference with the requested type and the target holds a reference back
//! with the *inverse* type, both compressed into the storage vocabulary.
//! This module owns that discipline; nothing else writes reference arrays.
//!
//! Reads are derived, not cached. Outgoing links come straight from the
//! artifact's own reference array; incoming links require scanning every
//! artifact in the store, which is an accepted O(N) cost since direction is
//! only recorded at the source.

use crate::domain::{Artifact, ArtifactId, Link, LinkType, Reference};
use crate::error::{Error, Result};
use crate::store::ArtifactStore;
use serde::Serialize;

/// Incoming and outgoing links of one artifact.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSet {
    /// Links pointing at the artifact, found by scanning the store.
    pub incoming: Vec<Link>,

    /// Links owned by the artifact's own reference array.
    pub outgoing: Vec<Link>,
}

/// Result of a link creation: the synthesized link plus an optional
/// non-fatal warning (currently only for duplicate attempts).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkOutcome {
    /// The link as seen from the source side.
    pub link: Link,

    /// Set when the source already held a reference to the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

fn synthesize(owner: &Artifact, reference: &Reference) -> Link {
    Link {
        source_id: owner.id.clone(),
        target_id: reference.target_id.clone(),
        link_type: reference.reference_type.widen(),
        created_at: owner.updated_at,
    }
}

/// Links owned by `id`, built from its reference array.
///
/// An unknown ID yields an empty list rather than an error.
///
/// # Errors
///
/// Returns an error if the store read fails.
pub async fn outgoing_links(store: &dyn ArtifactStore, id: &ArtifactId) -> Result<Vec<Link>> {
    let Some(artifact) = store.load(id).await? else {
        return Ok(Vec::new());
    };
    Ok(artifact
        .references
        .iter()
        .map(|r| synthesize(&artifact, r))
        .collect())
}

/// Links pointing at `id`, found by scanning every artifact in the store.
///
/// The scan is honest: references to `id` count even if `id` itself does
/// not exist (a partially persisted link can leave such a state).
///
/// # Errors
///
/// Returns an error if the store read fails.
pub async fn incoming_links(store: &dyn ArtifactStore, id: &ArtifactId) -> Result<Vec<Link>> {
    let all = store.list(&Default::default()).await?;
    let mut links = Vec::new();
    for artifact in &all {
        for reference in &artifact.references {
            if &reference.target_id == id {
                links.push(synthesize(artifact, reference));
            }
        }
    }
    Ok(links)
}

/// Creates, removes, and re-types links, keeping both endpoints' reference
/// arrays in step.
///
/// Holds a mutable borrow of the store for its lifetime; construct one per
/// logical operation rather than keeping it around.
pub struct LinkMaintainer<'a> {
    store: &'a mut dyn ArtifactStore,
}

impl<'a> LinkMaintainer<'a> {
    /// Create a maintainer over the given store.
    pub fn new(store: &'a mut dyn ArtifactStore) -> Self {
        Self { store }
    }

    /// Create a typed link from `source_id` to `target_id`.
    ///
    /// Both artifacts must exist. The source gains a reference with the
    /// requested type; the target gains a reference back with the inverse
    /// type; both are compressed into the storage vocabulary. Each side is
    /// checked and written independently, so an asymmetric state left by an
    /// earlier failed write is repaired rather than doubled.
    ///
    /// A duplicate attempt leaves the existing reference untouched (first
    /// writer wins) and reports a warning naming both IDs and the type
    /// already in place.
    ///
    /// Self-links are permitted and record a single reference.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArtifactNotFound`] naming whichever endpoint is
    /// missing, or a store error if persistence fails. If the source-side
    /// write succeeds and the target-side write fails, the link is left
    /// asymmetric; there is no rollback.
    pub async fn create_link(
        &mut self,
        source_id: &ArtifactId,
        target_id: &ArtifactId,
        link_type: LinkType,
    ) -> Result<LinkOutcome> {
        if source_id == target_id {
            return self.create_self_link(source_id, link_type).await;
        }

        let mut source = self
            .store
            .load(source_id)
            .await?
            .ok_or_else(|| Error::ArtifactNotFound(source_id.clone()))?;
        let mut target = self
            .store
            .load(target_id)
            .await?
            .ok_or_else(|| Error::ArtifactNotFound(target_id.clone()))?;

        let mut warning = None;
        if let Some(existing) = source.reference_to(target_id) {
            tracing::warn!(%source_id, %target_id, existing = %existing.reference_type, "duplicate link attempt");
            warning = Some(duplicate_warning(source_id, target_id, existing));
        } else {
            source.push_reference(Reference {
                target_id: target_id.clone(),
                target_type: target.artifact_type,
                reference_type: link_type.storage(),
            });
            source.touch();
            self.store.save(source.clone()).await?;
        }

        if target.reference_to(source_id).is_none() {
            target.push_reference(Reference {
                target_id: source_id.clone(),
                target_type: source.artifact_type,
                reference_type: link_type.inverse().storage(),
            });
            target.touch();
            self.store.save(target).await?;
        }

        Ok(LinkOutcome {
            link: Link {
                source_id: source_id.clone(),
                target_id: target_id.clone(),
                link_type,
                created_at: source.updated_at,
            },
            warning,
        })
    }

    async fn create_self_link(
        &mut self,
        id: &ArtifactId,
        link_type: LinkType,
    ) -> Result<LinkOutcome> {
        let mut artifact = self
            .store
            .load(id)
            .await?
            .ok_or_else(|| Error::ArtifactNotFound(id.clone()))?;

        let mut warning = None;
        if let Some(existing) = artifact.reference_to(id) {
            tracing::warn!(artifact_id = %id, existing = %existing.reference_type, "duplicate self-link attempt");
            warning = Some(duplicate_warning(id, id, existing));
        } else {
            // One reference only; the inverse side would land on the same
            // artifact and find this entry already present.
            artifact.push_reference(Reference {
                target_id: id.clone(),
                target_type: artifact.artifact_type,
                reference_type: link_type.storage(),
            });
            artifact.touch();
            self.store.save(artifact.clone()).await?;
        }

        Ok(LinkOutcome {
            link: Link {
                source_id: id.clone(),
                target_id: id.clone(),
                link_type,
                created_at: artifact.updated_at,
            },
            warning,
        })
    }

    /// Remove the link between two artifacts.
    ///
    /// Each side is handled independently: a missing artifact or an
    /// already-absent reference on either side is simply skipped, so this
    /// also cleans up asymmetric leftovers from partial writes.
    ///
    /// # Errors
    ///
    /// Returns an error only if a store read or write fails.
    pub async fn remove_link(
        &mut self,
        source_id: &ArtifactId,
        target_id: &ArtifactId,
    ) -> Result<()> {
        if let Some(mut source) = self.store.load(source_id).await? {
            if source.remove_reference(target_id) {
                source.touch();
                self.store.save(source).await?;
            }
        }
        if source_id == target_id {
            return Ok(());
        }
        if let Some(mut target) = self.store.load(target_id).await? {
            if target.remove_reference(source_id) {
                target.touch();
                self.store.save(target).await?;
            }
        }
        Ok(())
    }

    /// Re-type an existing link: remove, then create with the new type.
    ///
    /// The two steps are not atomic; a failure in the create step leaves
    /// the link removed.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::remove_link`] and [`Self::create_link`].
    pub async fn update_link_type(
        &mut self,
        source_id: &ArtifactId,
        target_id: &ArtifactId,
        new_type: LinkType,
    ) -> Result<LinkOutcome> {
        self.remove_link(source_id, target_id).await?;
        self.create_link(source_id, target_id, new_type).await
    }

    /// All links touching `id`, split into incoming and outgoing.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn links_of(&self, id: &ArtifactId) -> Result<LinkSet> {
        Ok(LinkSet {
            incoming: incoming_links(&*self.store, id).await?,
            outgoing: outgoing_links(&*self.store, id).await?,
        })
    }

    /// Link one source to several targets with the same type.
    ///
    /// The source and every target are checked for existence before any
    /// link is created; a missing ID fails the whole batch with zero
    /// mutations. After validation, links are created one at a time with no
    /// rollback, so a store failure partway through leaves the earlier
    /// links in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArtifactNotFound`] naming the first missing ID, or
    /// a store error from an individual creation.
    pub async fn batch_link(
        &mut self,
        source_id: &ArtifactId,
        target_ids: &[ArtifactId],
        link_type: LinkType,
    ) -> Result<Vec<LinkOutcome>> {
        if !self.store.exists(source_id).await? {
            return Err(Error::ArtifactNotFound(source_id.clone()));
        }
        for target_id in target_ids {
            if !self.store.exists(target_id).await? {
                return Err(Error::ArtifactNotFound(target_id.clone()));
            }
        }

        let mut outcomes = Vec::with_capacity(target_ids.len());
        for target_id in target_ids {
            outcomes.push(self.create_link(source_id, target_id, link_type).await?);
        }
        Ok(outcomes)
    }
}

fn duplicate_warning(source_id: &ArtifactId, target_id: &ArtifactId, existing: &Reference) -> String {
    format!(
        "Link already exists between {source_id} and {target_id} (existing type: {})",
        existing.reference_type
    )
}
