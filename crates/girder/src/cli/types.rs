//! CLI-facing enum types bridging clap's `ValueEnum` and the domain enums.
//!
//! Keeping these separate from the domain types lets the CLI vocabulary
//! evolve (aliases, hidden variants) without touching serialized data.

use crate::domain::{ArtifactStatus, ArtifactType, LinkType};
use crate::graph::GraphFormat;
use clap::ValueEnum;
use std::fmt;

/// Artifact type for CLI arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArtifactTypeArg {
    /// Design proposal
    Rfc,
    /// Decision record
    Adr,
    /// Decomposition plan
    Decomposition,
}

impl fmt::Display for ArtifactTypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactTypeArg::Rfc => write!(f, "rfc"),
            ArtifactTypeArg::Adr => write!(f, "adr"),
            ArtifactTypeArg::Decomposition => write!(f, "decomposition"),
        }
    }
}

impl From<ArtifactTypeArg> for ArtifactType {
    fn from(arg: ArtifactTypeArg) -> Self {
        match arg {
            ArtifactTypeArg::Rfc => ArtifactType::Rfc,
            ArtifactTypeArg::Adr => ArtifactType::Adr,
            ArtifactTypeArg::Decomposition => ArtifactType::Decomposition,
        }
    }
}

impl From<ArtifactType> for ArtifactTypeArg {
    fn from(artifact_type: ArtifactType) -> Self {
        match artifact_type {
            ArtifactType::Rfc => ArtifactTypeArg::Rfc,
            ArtifactType::Adr => ArtifactTypeArg::Adr,
            ArtifactType::Decomposition => ArtifactTypeArg::Decomposition,
        }
    }
}

/// Artifact status for CLI arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArtifactStatusArg {
    /// Being written (RFC)
    Draft,
    /// Under review (RFC)
    Review,
    /// Approved for implementation (RFC)
    Approved,
    /// Implemented (RFC)
    Implemented,
    /// No longer recommended
    Deprecated,
    /// Proposed decision (ADR)
    Proposed,
    /// Accepted decision (ADR)
    Accepted,
    /// Rejected decision (ADR)
    Rejected,
    /// Replaced by a newer record
    Superseded,
    /// Not started (DECOMP)
    Pending,
    /// Being worked (DECOMP)
    InProgress,
    /// Finished (DECOMP)
    Completed,
}

impl fmt::Display for ArtifactStatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Same strings as the domain enum's serde representation
        write!(f, "{}", ArtifactStatus::from(*self))
    }
}

impl From<ArtifactStatusArg> for ArtifactStatus {
    fn from(arg: ArtifactStatusArg) -> Self {
        match arg {
            ArtifactStatusArg::Draft => ArtifactStatus::Draft,
            ArtifactStatusArg::Review => ArtifactStatus::Review,
            ArtifactStatusArg::Approved => ArtifactStatus::Approved,
            ArtifactStatusArg::Implemented => ArtifactStatus::Implemented,
            ArtifactStatusArg::Deprecated => ArtifactStatus::Deprecated,
            ArtifactStatusArg::Proposed => ArtifactStatus::Proposed,
            ArtifactStatusArg::Accepted => ArtifactStatus::Accepted,
            ArtifactStatusArg::Rejected => ArtifactStatus::Rejected,
            ArtifactStatusArg::Superseded => ArtifactStatus::Superseded,
            ArtifactStatusArg::Pending => ArtifactStatus::Pending,
            ArtifactStatusArg::InProgress => ArtifactStatus::InProgress,
            ArtifactStatusArg::Completed => ArtifactStatus::Completed,
        }
    }
}

impl From<ArtifactStatus> for ArtifactStatusArg {
    fn from(status: ArtifactStatus) -> Self {
        match status {
            ArtifactStatus::Draft => ArtifactStatusArg::Draft,
            ArtifactStatus::Review => ArtifactStatusArg::Review,
            ArtifactStatus::Approved => ArtifactStatusArg::Approved,
            ArtifactStatus::Implemented => ArtifactStatusArg::Implemented,
            ArtifactStatus::Deprecated => ArtifactStatusArg::Deprecated,
            ArtifactStatus::Proposed => ArtifactStatusArg::Proposed,
            ArtifactStatus::Accepted => ArtifactStatusArg::Accepted,
            ArtifactStatus::Rejected => ArtifactStatusArg::Rejected,
            ArtifactStatus::Superseded => ArtifactStatusArg::Superseded,
            ArtifactStatus::Pending => ArtifactStatusArg::Pending,
            ArtifactStatus::InProgress => ArtifactStatusArg::InProgress,
            ArtifactStatus::Completed => ArtifactStatusArg::Completed,
        }
    }
}

/// Link type for CLI arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LinkTypeArg {
    /// Source implements the target
    Implements,
    /// Source supersedes the target
    Supersedes,
    /// Undirected association
    RelatesTo,
    /// Source depends on the target
    DependsOn,
    /// Source blocks the target
    Blocks,
    /// Source enables the target
    Enables,
}

impl fmt::Display for LinkTypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", LinkType::from(*self))
    }
}

impl From<LinkTypeArg> for LinkType {
    fn from(arg: LinkTypeArg) -> Self {
        match arg {
            LinkTypeArg::Implements => LinkType::Implements,
            LinkTypeArg::Supersedes => LinkType::Supersedes,
            LinkTypeArg::RelatesTo => LinkType::RelatesTo,
            LinkTypeArg::DependsOn => LinkType::DependsOn,
            LinkTypeArg::Blocks => LinkType::Blocks,
            LinkTypeArg::Enables => LinkType::Enables,
        }
    }
}

impl From<LinkType> for LinkTypeArg {
    fn from(link_type: LinkType) -> Self {
        match link_type {
            LinkType::Implements => LinkTypeArg::Implements,
            LinkType::Supersedes => LinkTypeArg::Supersedes,
            LinkType::RelatesTo => LinkTypeArg::RelatesTo,
            LinkType::DependsOn => LinkTypeArg::DependsOn,
            LinkType::Blocks => LinkTypeArg::Blocks,
            LinkType::Enables => LinkTypeArg::Enables,
        }
    }
}

/// Graph output format for CLI arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormatArg {
    /// Mermaid flow diagram
    Mermaid,
    /// Graphviz DOT
    Dot,
}

impl fmt::Display for GraphFormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphFormatArg::Mermaid => write!(f, "mermaid"),
            GraphFormatArg::Dot => write!(f, "dot"),
        }
    }
}

impl From<GraphFormatArg> for GraphFormat {
    fn from(arg: GraphFormatArg) -> Self {
        match arg {
            GraphFormatArg::Mermaid => GraphFormat::Mermaid,
            GraphFormatArg::Dot => GraphFormat::Dot,
        }
    }
}

impl From<GraphFormat> for GraphFormatArg {
    fn from(format: GraphFormat) -> Self {
        match format {
            GraphFormat::Mermaid => GraphFormatArg::Mermaid,
            GraphFormat::Dot => GraphFormatArg::Dot,
        }
    }
}
