//! Domain types for decision-record artifacts.
//!
//! An [`Artifact`] is the stored record of one decision document: a design
//! proposal (`RFC`), a decision record (`ADR`), or a decomposition plan
//! (`DECOMP`). Artifacts carry a flat list of [`Reference`]s pointing at
//! other artifacts; those references are the only place relationships live.
//! A [`Link`] is the richer directed view synthesized from a reference when
//! reading, never stored itself.
//!
//! The reference vocabulary is narrower than the link vocabulary: `blocks`
//! and `enables` links compress to `relates-to` when stored, and nothing
//! recovers the original value on read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an artifact, shaped like `RFC-0001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactId(pub String);

impl ArtifactId {
    /// Create a new artifact ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The artifact type implied by this ID's prefix, if the prefix is known.
    #[must_use]
    pub fn artifact_type(&self) -> Option<ArtifactType> {
        let (prefix, _) = self.0.split_once('-')?;
        ArtifactType::from_prefix(prefix)
    }

    /// The ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ArtifactId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ArtifactId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Represents a decision-record artifact.
///
/// Serialized field names are camelCase; the reference array's shape is a
/// durable contract shared with every other tool that reads the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Unique identifier, `{PREFIX}-{NNNN}`.
    pub id: ArtifactId,

    /// Artifact kind.
    #[serde(rename = "type")]
    pub artifact_type: ArtifactType,

    /// Current lifecycle status.
    pub status: ArtifactStatus,

    /// Human-readable title.
    pub title: String,

    /// Owner (optional).
    #[serde(default)]
    pub owner: Option<String>,

    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,

    /// Outgoing references to other artifacts.
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl Artifact {
    /// Returns this artifact's reference to `target`, if one exists.
    ///
    /// There is at most one reference per target; creation refuses to insert
    /// a second entry for the same target.
    #[must_use]
    pub fn reference_to(&self, target: &ArtifactId) -> Option<&Reference> {
        self.references.iter().find(|r| &r.target_id == target)
    }

    /// Appends a reference.
    pub fn push_reference(&mut self, reference: Reference) {
        self.references.push(reference);
    }

    /// Removes the reference to `target`, returning whether one was removed.
    pub fn remove_reference(&mut self, target: &ArtifactId) -> bool {
        let before = self.references.len();
        self.references.retain(|r| &r.target_id != target);
        self.references.len() < before
    }

    /// Overwrites the fields an update sets, leaving the rest alone.
    ///
    /// Does not stamp `updated_at`; callers decide when to [`touch`].
    ///
    /// [`touch`]: Artifact::touch
    pub fn apply_update(&mut self, update: ArtifactUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(owner) = update.owner {
            self.owner = owner;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
    }

    /// Stamps the artifact with the current time.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Kind of decision-record artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactType {
    /// Design proposal.
    Rfc,

    /// Decision record.
    Adr,

    /// Decomposition plan.
    Decomposition,
}

impl ArtifactType {
    /// The ID prefix for this artifact type.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Rfc => "RFC",
            Self::Adr => "ADR",
            Self::Decomposition => "DECOMP",
        }
    }

    /// Resolves an ID prefix back to its artifact type.
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "RFC" => Some(Self::Rfc),
            "ADR" => Some(Self::Adr),
            "DECOMP" => Some(Self::Decomposition),
            _ => None,
        }
    }

    /// Impact weight of this artifact type: RFCs carry the most weight,
    /// decomposition plans the least.
    #[must_use]
    pub fn weight(self) -> u32 {
        match self {
            Self::Rfc => 3,
            Self::Adr => 2,
            Self::Decomposition => 1,
        }
    }

    /// The status a freshly created artifact of this type starts in.
    #[must_use]
    pub fn default_status(self) -> ArtifactStatus {
        match self {
            Self::Rfc => ArtifactStatus::Draft,
            Self::Adr => ArtifactStatus::Proposed,
            Self::Decomposition => ArtifactStatus::Pending,
        }
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Rfc => "rfc",
            Self::Adr => "adr",
            Self::Decomposition => "decomposition",
        };
        write!(f, "{s}")
    }
}

/// Lifecycle status of an artifact.
///
/// The set is the union of the per-type lifecycles (RFCs move draft through
/// implemented, ADRs proposed through superseded, decomposition plans
/// pending through completed). Nothing here rejects a status that is unusual
/// for a type; that is a concern for editing tools, not the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactStatus {
    /// Being written (RFC).
    Draft,

    /// Under review (RFC).
    Review,

    /// Approved for implementation (RFC).
    Approved,

    /// Implemented (RFC).
    Implemented,

    /// No longer current (RFC).
    Deprecated,

    /// Proposed decision (ADR).
    Proposed,

    /// Accepted decision (ADR).
    Accepted,

    /// Rejected decision (ADR).
    Rejected,

    /// Replaced by a newer decision (ADR).
    Superseded,

    /// Not yet started (decomposition).
    Pending,

    /// Being executed (decomposition).
    InProgress,

    /// Finished (decomposition).
    Completed,
}

impl ArtifactStatus {
    /// Impact weight of this status. Active statuses weigh the most,
    /// retired ones nothing, anything else a baseline of 1.
    #[must_use]
    pub fn weight(self) -> u32 {
        match self {
            Self::Approved | Self::Accepted | Self::Implemented => 3,
            Self::Review | Self::Proposed => 2,
            Self::Deprecated | Self::Superseded | Self::Rejected => 0,
            // draft, pending, and any status outside the named tiers
            _ => 1,
        }
    }

    /// Whether this status marks an artifact as retired.
    #[must_use]
    pub fn is_retired(self) -> bool {
        matches!(self, Self::Deprecated | Self::Superseded | Self::Rejected)
    }

    /// Whether this status marks an artifact as still being shaped.
    #[must_use]
    pub fn is_tentative(self) -> bool {
        matches!(self, Self::Draft | Self::Proposed | Self::Review)
    }
}

impl fmt::Display for ArtifactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::Review => "review",
            Self::Approved => "approved",
            Self::Implemented => "implemented",
            Self::Deprecated => "deprecated",
            Self::Proposed => "proposed",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Superseded => "superseded",
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

/// A stored reference from one artifact to another.
///
/// The serialized shape (`targetId`, `targetType`, `referenceType`) is the
/// storage contract; external serializers round-trip exactly these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// ID of the referenced artifact.
    pub target_id: ArtifactId,

    /// Type of the referenced artifact, kept consistent with the actual
    /// target record.
    pub target_type: ArtifactType,

    /// Relationship type, in the restricted storage vocabulary.
    pub reference_type: ReferenceType,
}

/// Relationship vocabulary allowed in stored references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceType {
    /// Source realizes the target.
    Implements,

    /// Source replaces the target.
    Supersedes,

    /// Source needs the target.
    DependsOn,

    /// Loose association; also the stored image of `blocks` and `enables`.
    RelatesTo,
}

impl ReferenceType {
    /// Widens a stored reference type back to the link vocabulary.
    ///
    /// `blocks` and `enables` were compressed to `relates-to` on the way in
    /// and come back as `relates-to`; the original value is gone.
    #[must_use]
    pub fn widen(self) -> LinkType {
        match self {
            Self::Implements => LinkType::Implements,
            Self::Supersedes => LinkType::Supersedes,
            Self::DependsOn => LinkType::DependsOn,
            Self::RelatesTo => LinkType::RelatesTo,
        }
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Implements => "implements",
            Self::Supersedes => "supersedes",
            Self::DependsOn => "depends-on",
            Self::RelatesTo => "relates-to",
        };
        write!(f, "{s}")
    }
}

/// Relationship vocabulary accepted by link operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkType {
    /// Source realizes the target.
    Implements,

    /// Source replaces the target.
    Supersedes,

    /// Loose association.
    RelatesTo,

    /// Source needs the target.
    DependsOn,

    /// Source prevents work on the target.
    Blocks,

    /// Source makes the target possible.
    Enables,
}

impl LinkType {
    /// The link type recorded on the target's side of a new link.
    ///
    /// | Forward      | Inverse      |
    /// |--------------|--------------|
    /// | `implements` | `depends-on` |
    /// | `depends-on` | `enables`    |
    /// | `enables`    | `depends-on` |
    /// | `supersedes` | `supersedes` |
    /// | `relates-to` | `relates-to` |
    /// | `blocks`     | `blocks`     |
    ///
    /// Note the asymmetry: the inverse of `implements` is `depends-on`, but
    /// the inverse of `depends-on` is `enables`. Round-tripping through
    /// `inverse` twice does not always return the starting type.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::Implements => Self::DependsOn,
            Self::DependsOn => Self::Enables,
            Self::Enables => Self::DependsOn,
            Self::Supersedes => Self::Supersedes,
            Self::RelatesTo => Self::RelatesTo,
            Self::Blocks => Self::Blocks,
        }
    }

    /// Compresses this link type into the storage vocabulary.
    ///
    /// `blocks` and `enables` have no stored form and collapse to
    /// `relates-to`; the distinction is lost permanently.
    #[must_use]
    pub fn storage(self) -> ReferenceType {
        match self {
            Self::Implements => ReferenceType::Implements,
            Self::Supersedes => ReferenceType::Supersedes,
            Self::DependsOn => ReferenceType::DependsOn,
            Self::RelatesTo | Self::Blocks | Self::Enables => ReferenceType::RelatesTo,
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Implements => "implements",
            Self::Supersedes => "supersedes",
            Self::RelatesTo => "relates-to",
            Self::DependsOn => "depends-on",
            Self::Blocks => "blocks",
            Self::Enables => "enables",
        };
        write!(f, "{s}")
    }
}

/// A directed link synthesized from a stored reference.
///
/// Links are a read-side view; `created_at` is borrowed from the owning
/// artifact's `updated_at` since references carry no timestamp of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Artifact the link points from.
    pub source_id: ArtifactId,

    /// Artifact the link points to.
    pub target_id: ArtifactId,

    /// Relationship type.
    #[serde(rename = "type")]
    pub link_type: LinkType,

    /// Timestamp borrowed from the source artifact's last update.
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new artifact.
#[derive(Debug, Clone)]
pub struct NewArtifact {
    /// Artifact kind.
    pub artifact_type: ArtifactType,

    /// Title.
    pub title: String,

    /// Owner (optional).
    pub owner: Option<String>,

    /// Tags.
    pub tags: Vec<String>,

    /// Starting status; the type's default when `None`.
    pub status: Option<ArtifactStatus>,
}

/// Data for updating an existing artifact.
#[derive(Debug, Clone, Default)]
pub struct ArtifactUpdate {
    /// New title (if updating).
    pub title: Option<String>,

    /// New status (if updating).
    pub status: Option<ArtifactStatus>,

    /// New owner (if updating, inner `None` to clear).
    pub owner: Option<Option<String>>,

    /// Replacement tag list (if updating).
    pub tags: Option<Vec<String>>,
}

/// Filter for querying artifacts.
#[derive(Debug, Clone, Default)]
pub struct ArtifactFilter {
    /// Filter by artifact type.
    pub artifact_type: Option<ArtifactType>,

    /// Filter by status.
    pub status: Option<ArtifactStatus>,

    /// Filter by owner.
    pub owner: Option<String>,

    /// Filter by tag.
    pub tag: Option<String>,

    /// Limit number of results.
    pub limit: Option<usize>,
}

impl ArtifactFilter {
    /// Whether `artifact` passes every set criterion. The limit is applied
    /// by the store, not here.
    #[must_use]
    pub fn matches(&self, artifact: &Artifact) -> bool {
        if let Some(t) = self.artifact_type {
            if artifact.artifact_type != t {
                return false;
            }
        }
        if let Some(s) = self.status {
            if artifact.status != s {
                return false;
            }
        }
        if let Some(owner) = &self.owner {
            if artifact.owner.as_deref() != Some(owner.as_str()) {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !artifact.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        true
    }
}
