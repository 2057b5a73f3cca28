//! Blast-radius analysis over incoming references.
//!
//! Everything here runs the same BFS: starting from a target artifact,
//! walk the incoming-reference relation to find every artifact that
//! depends on it, directly or transitively. The BFS feeds three surfaces:
//!
//! - [`ImpactAnalyzer::analyze`]: dependents split by depth plus a risk
//!   score
//! - [`ImpactAnalyzer::risk_score`]: the score alone
//! - [`ImpactAnalyzer::deprecation_checklist`]: one prioritized task per
//!   dependent
//!
//! A target with no dependents scores exactly 0, including when the target
//! itself does not exist; the BFS just finds no incoming links.

use crate::domain::{ArtifactId, ArtifactStatus, ArtifactType};
use crate::error::Result;
use crate::links;
use crate::store::ArtifactStore;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::fmt;

/// Maximum BFS depth.
///
/// The visited set already guarantees termination; this bounds the damage
/// if a store hands back pathological data.
const MAX_TRAVERSAL_DEPTH: u32 = 256;

/// Risk scores never exceed this.
const MAX_RISK_SCORE: u32 = 100;

/// One artifact found by the dependent traversal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependentRecord {
    /// The dependent's ID.
    pub id: ArtifactId,

    /// BFS depth at which it was discovered (1 = references the target
    /// directly).
    pub depth: u32,

    /// Type weight times status weight; 0 when the artifact could not be
    /// loaded.
    pub criticality: u32,

    /// Artifact type, when the record loaded.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub artifact_type: Option<ArtifactType>,

    /// Artifact status, when the record loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ArtifactStatus>,
}

/// Result of [`ImpactAnalyzer::analyze`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReport {
    /// The analyzed artifact.
    pub artifact_id: ArtifactId,

    /// Dependents at depth 1.
    pub direct_dependents: Vec<DependentRecord>,

    /// Dependents at depth 2 and beyond.
    pub transitive_dependents: Vec<DependentRecord>,

    /// Bounded risk score in `[0, 100]`.
    pub risk_score: u32,

    /// Greatest BFS depth reached; 0 with no dependents.
    pub max_depth: u32,
}

/// Priority bucket for a checklist task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Criticality 6 or more.
    High,

    /// Criticality 3 to 5.
    Medium,

    /// Everything else.
    Low,
}

impl TaskPriority {
    fn from_criticality(criticality: u32) -> Self {
        if criticality >= 6 {
            Self::High
        } else if criticality >= 3 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        write!(f, "{s}")
    }
}

/// One remediation step for a dependent of a to-be-deprecated artifact.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistTask {
    /// The dependent to update.
    pub artifact_id: ArtifactId,

    /// Human-readable instruction naming both the dependent and the
    /// target.
    pub action: String,

    /// Priority derived from the dependent's criticality.
    pub priority: TaskPriority,
}

/// Result of [`ImpactAnalyzer::deprecation_checklist`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeprecationChecklist {
    /// The artifact being deprecated.
    pub artifact_id: ArtifactId,

    /// Tasks ordered by dependent criticality, highest first.
    pub tasks: Vec<ChecklistTask>,
}

/// Read-only impact queries over the artifact store.
pub struct ImpactAnalyzer<'a> {
    store: &'a dyn ArtifactStore,
}

impl<'a> ImpactAnalyzer<'a> {
    /// Create an analyzer over the given store.
    pub fn new(store: &'a dyn ArtifactStore) -> Self {
        Self { store }
    }

    /// BFS over incoming references, in discovery order.
    ///
    /// The visited set is seeded with the start node, so cycles (including
    /// the 2-cycles every bidirectional link produces) terminate and the
    /// target never lists itself as its own dependent.
    async fn collect_dependents(&self, target: &ArtifactId) -> Result<Vec<DependentRecord>> {
        let mut visited: HashSet<ArtifactId> = HashSet::from([target.clone()]);
        let mut queue: VecDeque<(ArtifactId, u32)> = VecDeque::from([(target.clone(), 0)]);
        let mut found = Vec::new();

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= MAX_TRAVERSAL_DEPTH {
                continue;
            }
            for link in links::incoming_links(self.store, &current).await? {
                let dependent = link.source_id;
                if !visited.insert(dependent.clone()) {
                    continue;
                }
                let next_depth = depth + 1;
                let (criticality, artifact_type, status) =
                    match self.store.load(&dependent).await? {
                        Some(a) => (
                            a.artifact_type.weight() * a.status.weight(),
                            Some(a.artifact_type),
                            Some(a.status),
                        ),
                        None => (0, None, None),
                    };
                found.push(DependentRecord {
                    id: dependent.clone(),
                    depth: next_depth,
                    criticality,
                    artifact_type,
                    status,
                });
                queue.push_back((dependent, next_depth));
            }
        }
        Ok(found)
    }

    /// Full impact report for `id`: dependents split into direct and
    /// transitive, the risk score, and the deepest level reached.
    ///
    /// # Errors
    ///
    /// Returns an error if a store read fails.
    pub async fn analyze(&self, id: &ArtifactId) -> Result<ImpactReport> {
        let records = self.collect_dependents(id).await?;
        let max_depth = records.iter().map(|r| r.depth).max().unwrap_or(0);
        let risk_score = score(&records, max_depth);
        let (direct_dependents, transitive_dependents) =
            records.into_iter().partition(|r| r.depth == 1);
        Ok(ImpactReport {
            artifact_id: id.clone(),
            direct_dependents,
            transitive_dependents,
            risk_score,
            max_depth,
        })
    }

    /// The risk score alone.
    ///
    /// # Errors
    ///
    /// Returns an error if a store read fails.
    pub async fn risk_score(&self, id: &ArtifactId) -> Result<u32> {
        let records = self.collect_dependents(id).await?;
        let max_depth = records.iter().map(|r| r.depth).max().unwrap_or(0);
        Ok(score(&records, max_depth))
    }

    /// A prioritized task list for deprecating `id`.
    ///
    /// Tasks are sorted by the dependent's criticality, highest first;
    /// ties keep BFS discovery order.
    ///
    /// # Errors
    ///
    /// Returns an error if a store read fails.
    pub async fn deprecation_checklist(&self, id: &ArtifactId) -> Result<DeprecationChecklist> {
        let mut records = self.collect_dependents(id).await?;
        records.sort_by(|a, b| b.criticality.cmp(&a.criticality));
        let tasks = records
            .iter()
            .map(|record| ChecklistTask {
                artifact_id: record.id.clone(),
                action: action_text(record, id),
                priority: TaskPriority::from_criticality(record.criticality),
            })
            .collect();
        Ok(DeprecationChecklist {
            artifact_id: id.clone(),
            tasks,
        })
    }
}

fn score(records: &[DependentRecord], max_depth: u32) -> u32 {
    if records.is_empty() {
        return 0;
    }
    let sum: u32 = records
        .iter()
        .map(|r| depth_weight(r.depth) + r.criticality)
        .sum();
    (sum + max_depth * 2).min(MAX_RISK_SCORE)
}

fn depth_weight(depth: u32) -> u32 {
    if depth == 1 { 10 } else { 5 }
}

fn action_text(record: &DependentRecord, target: &ArtifactId) -> String {
    if record.depth == 1 {
        format!(
            "Update {}: direct dependency on {} must be reviewed before deprecation",
            record.id, target
        )
    } else {
        format!(
            "Update {}: transitive dependency on {} must be reviewed before deprecation (depth: {})",
            record.id, target, record.depth
        )
    }
}
