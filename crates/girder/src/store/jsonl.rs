//! JSONL persistence for the artifact store.
//!
//! One artifact per line. Loading is resilient: malformed lines, duplicate
//! IDs, and references to artifacts that are not in the file are reported as
//! [`LoadWarning`]s instead of failing the load. A reference to a missing
//! target is a legal state (the other endpoint may have been written by a
//! partially failed link operation) and is kept as-is.

use crate::domain::{Artifact, ArtifactId};
use crate::error::{Result, StoreError};
use crate::store::{ArtifactStore, MemoryStore};
use girder_jsonl::JsonlReader;
use std::collections::{HashMap, HashSet};
use std::collections::hash_map::Entry;
use std::path::Path;

/// Warning generated while loading artifacts from a JSONL file.
#[derive(Debug, Clone)]
pub enum LoadWarning {
    /// A line could not be parsed as an artifact.
    MalformedRecord {
        /// Line number (1-based).
        line_number: usize,
        /// Parse error message.
        error: String,
    },

    /// Two records carried the same artifact ID; the later one wins.
    DuplicateArtifact {
        /// The duplicated ID.
        id: ArtifactId,
        /// Line number (1-based) of the winning record.
        line_number: usize,
    },

    /// An artifact references a target that is not in the file.
    DanglingReference {
        /// Artifact holding the reference.
        from: ArtifactId,
        /// The missing target.
        to: ArtifactId,
    },
}

/// Load artifacts from a JSONL file into a memory store.
///
/// Returns the store together with any warnings collected along the way.
/// Blank lines are skipped silently.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read. Parse failures on
/// individual lines are warnings, not errors.
pub async fn load_from_jsonl(path: &Path) -> Result<(Box<dyn ArtifactStore>, Vec<LoadWarning>)> {
    let file = tokio::fs::File::open(path).await?;
    let mut reader = JsonlReader::new(file);

    let mut warnings = Vec::new();
    let mut artifacts: Vec<Artifact> = Vec::new();
    let mut seen: HashMap<ArtifactId, usize> = HashMap::new();

    while let Some(line) = reader.read_line().await.map_err(StoreError::from)? {
        let line_number = reader.line_number();
        if line.trim().is_empty() {
            continue;
        }
        let artifact: Artifact = match serde_json::from_str(&line) {
            Ok(artifact) => artifact,
            Err(e) => {
                warnings.push(LoadWarning::MalformedRecord {
                    line_number,
                    error: e.to_string(),
                });
                continue;
            }
        };
        match seen.entry(artifact.id.clone()) {
            Entry::Occupied(slot) => {
                warnings.push(LoadWarning::DuplicateArtifact {
                    id: artifact.id.clone(),
                    line_number,
                });
                artifacts[*slot.get()] = artifact;
            }
            Entry::Vacant(slot) => {
                slot.insert(artifacts.len());
                artifacts.push(artifact);
            }
        }
    }

    // Second pass: flag references whose target never appeared. The
    // references themselves stay; dropping them would turn a report into a
    // silent edit.
    {
        let ids: HashSet<&ArtifactId> = artifacts.iter().map(|a| &a.id).collect();
        for artifact in &artifacts {
            for reference in &artifact.references {
                if !ids.contains(&reference.target_id) {
                    warnings.push(LoadWarning::DanglingReference {
                        from: artifact.id.clone(),
                        to: reference.target_id.clone(),
                    });
                }
            }
        }
    }

    Ok((Box::new(MemoryStore::from_artifacts(artifacts)), warnings))
}

/// Write every artifact in the store to a JSONL file.
///
/// References are sorted by target ID before writing so repeated saves of
/// the same state produce byte-identical files. The write goes through a
/// temp file and rename.
///
/// # Errors
///
/// Returns an error if exporting or writing fails.
pub async fn save_to_jsonl(store: &dyn ArtifactStore, path: &Path) -> Result<()> {
    let mut artifacts = store.export_all().await?;
    for artifact in &mut artifacts {
        artifact
            .references
            .sort_by(|a, b| a.target_id.cmp(&b.target_id));
    }
    girder_jsonl::write_jsonl_atomic(path, &artifacts)
        .await
        .map_err(StoreError::from)?;
    Ok(())
}
