//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::{Parser, Subcommand};

use super::types::{ArtifactStatusArg, ArtifactTypeArg, GraphFormatArg, LinkTypeArg};
use super::validators::{validate_artifact_id, validate_title};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug, Clone, Default)]
pub struct InfoArgs {}

/// Arguments for the `create` command
#[derive(Parser, Debug, Clone)]
pub struct CreateArgs {
    /// Artifact type (rfc, adr, or decomposition)
    ///
    /// Determines the ID prefix and the default starting status.
    #[arg(value_enum)]
    pub artifact_type: ArtifactTypeArg,

    /// Artifact title (maximum 200 characters)
    #[arg(value_parser = validate_title)]
    pub title: String,

    /// Owner username
    #[arg(short, long)]
    pub owner: Option<String>,

    /// Tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Initial status
    ///
    /// Defaults to the type's starting status: draft for RFCs, proposed
    /// for ADRs, pending for decompositions.
    #[arg(short, long, value_enum)]
    pub status: Option<ArtifactStatusArg>,
}

/// Arguments for the `list` command
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Filter by artifact type
    #[arg(short = 't', long = "type", value_enum)]
    pub artifact_type: Option<ArtifactTypeArg>,

    /// Filter by status
    #[arg(short, long, value_enum)]
    pub status: Option<ArtifactStatusArg>,

    /// Filter by owner
    #[arg(short, long)]
    pub owner: Option<String>,

    /// Filter by tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Maximum number of artifacts to display
    #[arg(short = 'n', long, default_value = "50")]
    pub limit: usize,
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Artifact ID to display
    #[arg(value_parser = validate_artifact_id)]
    pub artifact_id: String,
}

/// Arguments for the `update` command
#[derive(Parser, Debug, Clone)]
pub struct UpdateArgs {
    /// Artifact ID to update
    #[arg(value_parser = validate_artifact_id)]
    pub artifact_id: String,

    /// New title (maximum 200 characters)
    #[arg(long, value_parser = validate_title)]
    pub title: Option<String>,

    /// New status
    #[arg(short, long, value_enum)]
    pub status: Option<ArtifactStatusArg>,

    /// New owner
    #[arg(short, long)]
    pub owner: Option<String>,

    /// Clear the owner field
    #[arg(long, conflicts_with = "owner")]
    pub no_owner: bool,

    /// Replace the tag set (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,
}

/// Arguments for the `link` command
#[derive(Parser, Debug, Clone)]
pub struct LinkArgs {
    /// Link subcommand
    #[command(subcommand)]
    pub action: LinkAction,
}

/// Link management actions
#[derive(Subcommand, Debug, Clone)]
pub enum LinkAction {
    /// Add links from one artifact to one or more targets
    ///
    /// Every target is validated before any link is written, so a typo in
    /// one target ID fails the whole batch.
    Add {
        /// Source artifact ID
        #[arg(value_parser = validate_artifact_id)]
        source: String,

        /// Target artifact IDs (space- or comma-separated)
        #[arg(required = true, value_delimiter = ',', value_parser = validate_artifact_id)]
        targets: Vec<String>,

        /// Link type
        #[arg(short = 't', long = "type", value_enum, default_value = "relates-to")]
        link_type: LinkTypeArg,
    },

    /// Remove a link between two artifacts
    Remove {
        /// Source artifact ID
        #[arg(value_parser = validate_artifact_id)]
        source: String,

        /// Target artifact ID
        #[arg(value_parser = validate_artifact_id)]
        target: String,
    },

    /// Change the type of an existing link
    Retype {
        /// Source artifact ID
        #[arg(value_parser = validate_artifact_id)]
        source: String,

        /// Target artifact ID
        #[arg(value_parser = validate_artifact_id)]
        target: String,

        /// New link type
        #[arg(short = 't', long = "type", value_enum)]
        link_type: LinkTypeArg,
    },
}

/// Arguments for the `links` command
#[derive(Parser, Debug, Clone)]
pub struct LinksArgs {
    /// Artifact ID to inspect
    #[arg(value_parser = validate_artifact_id)]
    pub artifact_id: String,
}

/// Arguments for the `graph` command
#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "mermaid")]
    pub format: GraphFormatArg,

    /// Restrict the graph to artifacts reachable from this root
    #[arg(short, long, value_parser = validate_artifact_id)]
    pub root: Option<String>,
}

/// Arguments for the `cycles` command
#[derive(Parser, Debug, Clone, Default)]
pub struct CyclesArgs {}

/// Arguments for the `impact` command
#[derive(Parser, Debug, Clone)]
pub struct ImpactArgs {
    /// Artifact ID to analyze
    #[arg(value_parser = validate_artifact_id)]
    pub artifact_id: String,
}

/// Arguments for the `checklist` command
#[derive(Parser, Debug, Clone)]
pub struct ChecklistArgs {
    /// Artifact ID to plan deprecation for
    #[arg(value_parser = validate_artifact_id)]
    pub artifact_id: String,
}
