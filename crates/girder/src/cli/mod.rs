//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for girder using clap's derive API.
//! Each command has its own argument struct with validation and helpful error messages.
//!
//! # Commands
//!
//! - `init`: Initialize a new girder workspace
//! - `info`: Show workspace information
//! - `create`: Create a new artifact
//! - `list`: List artifacts with optional filters
//! - `show`: Show artifact details with links
//! - `update`: Update an existing artifact
//! - `link`: Add, remove, or re-type links between artifacts
//! - `links`: Show the links touching one artifact
//! - `graph`: Render the relationship graph
//! - `cycles`: Detect circular dependencies
//! - `impact`: Analyze what depends on an artifact
//! - `checklist`: Generate a deprecation checklist
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! girder create rfc "Unified caching layer" --owner alice --tags perf
//! girder link add RFC-0001 ADR-0001,ADR-0002 --type depends-on
//! girder graph --format dot --root RFC-0001
//! girder impact RFC-0001
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

// Re-export argument structs
pub use args::{
    ChecklistArgs, CreateArgs, CyclesArgs, GraphArgs, ImpactArgs, InfoArgs, InitArgs, LinkAction,
    LinkArgs, LinksArgs, ListArgs, ShowArgs, UpdateArgs,
};

// Re-export types
pub use types::{ArtifactStatusArg, ArtifactTypeArg, GraphFormatArg, LinkTypeArg};

// Re-export validators for external use
pub use validators::{validate_artifact_id, validate_title};

/// Girder - a decision-record relationship tracker
///
/// Track RFCs, ADRs, and decomposition plans with typed bidirectional links.
/// Artifacts are stored in `.girder/artifacts.jsonl` for easy version control
/// integration.
#[derive(Parser, Debug)]
#[command(name = "girder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new girder workspace
    ///
    /// Creates the `.girder/` directory with configuration and an empty
    /// artifact database. Run this once in your project root.
    Init(InitArgs),

    /// Show workspace information
    ///
    /// Displays the database path and artifact counts by type.
    Info(InfoArgs),

    /// Create a new artifact
    ///
    /// Allocates the next sequential ID for the given type (RFC-0001,
    /// ADR-0001, DECOMP-0001) and starts the artifact at its type's
    /// default status unless one is provided.
    Create(CreateArgs),

    /// List artifacts with optional filters
    ///
    /// Shows all artifacts matching the filter criteria, sorted by ID.
    List(ListArgs),

    /// Show detailed information about an artifact
    ///
    /// Displays all fields of an artifact plus its incoming and outgoing
    /// links.
    Show(ShowArgs),

    /// Update an existing artifact
    ///
    /// Modifies one or more fields of an existing artifact. Only provided
    /// fields are updated; other fields remain unchanged.
    Update(UpdateArgs),

    /// Manage links between artifacts
    ///
    /// Links are bidirectional: adding one writes a reference on the source
    /// and the inverse reference on the target.
    Link(LinkArgs),

    /// Show the links touching one artifact
    ///
    /// Displays incoming and outgoing links separately.
    Links(LinksArgs),

    /// Render the relationship graph
    ///
    /// Produces a flow-diagram or DOT rendering of the whole graph, or of
    /// the subgraph connected to a root artifact.
    Graph(GraphArgs),

    /// Detect circular dependencies
    ///
    /// Reports every reference cycle with a severity. Two-node cycles are
    /// warnings (every healthy link forms one); longer cycles are critical.
    Cycles(CyclesArgs),

    /// Analyze what depends on an artifact
    ///
    /// Walks incoming references to find direct and transitive dependents
    /// and computes a 0-100 risk score for deprecating the artifact.
    Impact(ImpactArgs),

    /// Generate a deprecation checklist
    ///
    /// Produces a prioritized task list covering every dependent that must
    /// be reviewed before the artifact can be retired.
    Checklist(ChecklistArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args).await,
            Some(Commands::Info(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_info(&app, args, output_mode).await
            }
            Some(Commands::Create(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_create(&mut app, args, output_mode).await
            }
            Some(Commands::List(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_list(&app, args, output_mode).await
            }
            Some(Commands::Show(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_show(&app, args, output_mode).await
            }
            Some(Commands::Update(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_update(&mut app, args, output_mode).await
            }
            Some(Commands::Link(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_link(&mut app, args, output_mode).await
            }
            Some(Commands::Links(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_links(&app, args, output_mode).await
            }
            Some(Commands::Graph(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_graph(&app, args, output_mode).await
            }
            Some(Commands::Cycles(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_cycles(&app, args, output_mode).await
            }
            Some(Commands::Impact(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_impact(&app, args, output_mode).await
            }
            Some(Commands::Checklist(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_checklist(&app, args, output_mode).await
            }
            None => {
                println!("Girder decision-record tracker");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== CLI Parsing Tests ==========

    #[test]
    fn test_parse_no_command() {
        let cli = Cli::try_parse_from(["girder"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_parse_global_json_flag() {
        let cli = Cli::try_parse_from(["girder", "--json", "list"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::List(_))));
    }

    #[test]
    fn test_parse_init_default() {
        let cli = Cli::try_parse_from(["girder", "init"]).unwrap();
        match cli.command {
            Some(Commands::Init(args)) => {
                assert!(!args.quiet);
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_parse_init_quiet() {
        let cli = Cli::try_parse_from(["girder", "init", "-q"]).unwrap();
        match cli.command {
            Some(Commands::Init(args)) => {
                assert!(args.quiet);
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_parse_info() {
        let cli = Cli::try_parse_from(["girder", "info"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Info(_))));
    }

    #[test]
    fn test_parse_info_with_json() {
        let cli = Cli::try_parse_from(["girder", "--json", "info"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::Info(_))));
    }

    #[test]
    fn test_parse_create_minimal() {
        let cli = Cli::try_parse_from(["girder", "create", "rfc", "Unified caching layer"]).unwrap();
        match cli.command {
            Some(Commands::Create(args)) => {
                assert_eq!(args.artifact_type, ArtifactTypeArg::Rfc);
                assert_eq!(args.title, "Unified caching layer");
                assert!(args.owner.is_none());
                assert!(args.tags.is_empty());
                assert!(args.status.is_none());
            }
            _ => panic!("Expected Create command"),
        }
    }

    #[test]
    fn test_parse_create_full() {
        let cli = Cli::try_parse_from([
            "girder",
            "create",
            "adr",
            "Pick a storage format",
            "--owner",
            "alice",
            "--tags",
            "storage,format",
            "--status",
            "accepted",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Create(args)) => {
                assert_eq!(args.artifact_type, ArtifactTypeArg::Adr);
                assert_eq!(args.title, "Pick a storage format");
                assert_eq!(args.owner, Some("alice".to_string()));
                assert_eq!(args.tags, vec!["storage", "format"]);
                assert_eq!(args.status, Some(ArtifactStatusArg::Accepted));
            }
            _ => panic!("Expected Create command"),
        }
    }

    #[test]
    fn test_parse_create_invalid_type() {
        let result = Cli::try_parse_from(["girder", "create", "epic", "Some title"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_create_empty_title() {
        let result = Cli::try_parse_from(["girder", "create", "rfc", "  "]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_create_missing_title() {
        let result = Cli::try_parse_from(["girder", "create", "rfc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_list_default() {
        let cli = Cli::try_parse_from(["girder", "list"]).unwrap();
        match cli.command {
            Some(Commands::List(args)) => {
                assert!(args.artifact_type.is_none());
                assert!(args.status.is_none());
                assert!(args.owner.is_none());
                assert!(args.tag.is_none());
                assert_eq!(args.limit, 50); // default
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_parse_list_with_filters() {
        let cli = Cli::try_parse_from([
            "girder",
            "list",
            "--type",
            "decomposition",
            "--status",
            "in-progress",
            "--owner",
            "bob",
            "--tag",
            "auth",
            "--limit",
            "10",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.artifact_type, Some(ArtifactTypeArg::Decomposition));
                assert_eq!(args.status, Some(ArtifactStatusArg::InProgress));
                assert_eq!(args.owner, Some("bob".to_string()));
                assert_eq!(args.tag, Some("auth".to_string()));
                assert_eq!(args.limit, 10);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["girder", "show", "RFC-0001"]).unwrap();
        match cli.command {
            Some(Commands::Show(args)) => {
                assert_eq!(args.artifact_id, "RFC-0001");
            }
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_parse_show_invalid_id() {
        let result = Cli::try_parse_from(["girder", "show", "TASK-0001"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_show_lowercase_id_rejected() {
        let result = Cli::try_parse_from(["girder", "show", "rfc-0001"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_update() {
        let cli = Cli::try_parse_from([
            "girder",
            "update",
            "ADR-0002",
            "--title",
            "Revised decision",
            "--status",
            "superseded",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Update(args)) => {
                assert_eq!(args.artifact_id, "ADR-0002");
                assert_eq!(args.title, Some("Revised decision".to_string()));
                assert_eq!(args.status, Some(ArtifactStatusArg::Superseded));
                assert!(args.owner.is_none());
                assert!(!args.no_owner);
                assert!(args.tags.is_none());
            }
            _ => panic!("Expected Update command"),
        }
    }

    #[test]
    fn test_parse_update_no_owner() {
        let cli = Cli::try_parse_from(["girder", "update", "RFC-0001", "--no-owner"]).unwrap();
        match cli.command {
            Some(Commands::Update(args)) => {
                assert!(args.no_owner);
            }
            _ => panic!("Expected Update command"),
        }
    }

    #[test]
    fn test_parse_update_owner_conflicts_with_no_owner() {
        let result = Cli::try_parse_from([
            "girder",
            "update",
            "RFC-0001",
            "--owner",
            "alice",
            "--no-owner",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_update_replace_tags() {
        let cli =
            Cli::try_parse_from(["girder", "update", "RFC-0001", "--tags", "auth,tokens"]).unwrap();
        match cli.command {
            Some(Commands::Update(args)) => {
                assert_eq!(args.tags, Some(vec!["auth".to_string(), "tokens".to_string()]));
            }
            _ => panic!("Expected Update command"),
        }
    }

    #[test]
    fn test_parse_link_add() {
        let cli = Cli::try_parse_from([
            "girder",
            "link",
            "add",
            "RFC-0001",
            "ADR-0001",
            "--type",
            "depends-on",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Link(args)) => match args.action {
                LinkAction::Add {
                    source,
                    targets,
                    link_type,
                } => {
                    assert_eq!(source, "RFC-0001");
                    assert_eq!(targets, vec!["ADR-0001"]);
                    assert_eq!(link_type, LinkTypeArg::DependsOn);
                }
                _ => panic!("Expected Add action"),
            },
            _ => panic!("Expected Link command"),
        }
    }

    #[test]
    fn test_parse_link_add_default_type() {
        let cli = Cli::try_parse_from(["girder", "link", "add", "RFC-0001", "ADR-0001"]).unwrap();
        match cli.command {
            Some(Commands::Link(args)) => match args.action {
                LinkAction::Add { link_type, .. } => {
                    assert_eq!(link_type, LinkTypeArg::RelatesTo);
                }
                _ => panic!("Expected Add action"),
            },
            _ => panic!("Expected Link command"),
        }
    }

    #[test]
    fn test_parse_link_add_comma_separated_targets() {
        let cli = Cli::try_parse_from(["girder", "link", "add", "RFC-0001", "ADR-0001,ADR-0002"])
            .unwrap();
        match cli.command {
            Some(Commands::Link(args)) => match args.action {
                LinkAction::Add { targets, .. } => {
                    assert_eq!(targets, vec!["ADR-0001", "ADR-0002"]);
                }
                _ => panic!("Expected Add action"),
            },
            _ => panic!("Expected Link command"),
        }
    }

    #[test]
    fn test_parse_link_add_space_separated_targets() {
        let cli = Cli::try_parse_from([
            "girder", "link", "add", "RFC-0001", "ADR-0001", "ADR-0002", "DECOMP-0001",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Link(args)) => match args.action {
                LinkAction::Add { targets, .. } => {
                    assert_eq!(targets, vec!["ADR-0001", "ADR-0002", "DECOMP-0001"]);
                }
                _ => panic!("Expected Add action"),
            },
            _ => panic!("Expected Link command"),
        }
    }

    #[test]
    fn test_parse_link_add_requires_target() {
        let result = Cli::try_parse_from(["girder", "link", "add", "RFC-0001"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_link_add_invalid_target_rejected() {
        let result = Cli::try_parse_from(["girder", "link", "add", "RFC-0001", "not-an-id"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_link_remove() {
        let cli = Cli::try_parse_from(["girder", "link", "remove", "RFC-0001", "ADR-0001"]).unwrap();
        match cli.command {
            Some(Commands::Link(args)) => match args.action {
                LinkAction::Remove { source, target } => {
                    assert_eq!(source, "RFC-0001");
                    assert_eq!(target, "ADR-0001");
                }
                _ => panic!("Expected Remove action"),
            },
            _ => panic!("Expected Link command"),
        }
    }

    #[test]
    fn test_parse_link_retype() {
        let cli = Cli::try_parse_from([
            "girder",
            "link",
            "retype",
            "RFC-0001",
            "ADR-0001",
            "--type",
            "blocks",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Link(args)) => match args.action {
                LinkAction::Retype {
                    source,
                    target,
                    link_type,
                } => {
                    assert_eq!(source, "RFC-0001");
                    assert_eq!(target, "ADR-0001");
                    assert_eq!(link_type, LinkTypeArg::Blocks);
                }
                _ => panic!("Expected Retype action"),
            },
            _ => panic!("Expected Link command"),
        }
    }

    #[test]
    fn test_parse_link_retype_requires_type() {
        let result = Cli::try_parse_from(["girder", "link", "retype", "RFC-0001", "ADR-0001"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_links() {
        let cli = Cli::try_parse_from(["girder", "links", "DECOMP-0003"]).unwrap();
        match cli.command {
            Some(Commands::Links(args)) => {
                assert_eq!(args.artifact_id, "DECOMP-0003");
            }
            _ => panic!("Expected Links command"),
        }
    }

    #[test]
    fn test_parse_graph_default() {
        let cli = Cli::try_parse_from(["girder", "graph"]).unwrap();
        match cli.command {
            Some(Commands::Graph(args)) => {
                assert_eq!(args.format, GraphFormatArg::Mermaid); // default
                assert!(args.root.is_none());
            }
            _ => panic!("Expected Graph command"),
        }
    }

    #[test]
    fn test_parse_graph_dot_with_root() {
        let cli =
            Cli::try_parse_from(["girder", "graph", "--format", "dot", "--root", "RFC-0001"])
                .unwrap();
        match cli.command {
            Some(Commands::Graph(args)) => {
                assert_eq!(args.format, GraphFormatArg::Dot);
                assert_eq!(args.root, Some("RFC-0001".to_string()));
            }
            _ => panic!("Expected Graph command"),
        }
    }

    #[test]
    fn test_parse_graph_invalid_root() {
        let result = Cli::try_parse_from(["girder", "graph", "--root", "bogus"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_cycles() {
        let cli = Cli::try_parse_from(["girder", "cycles"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Cycles(_))));
    }

    #[test]
    fn test_parse_impact() {
        let cli = Cli::try_parse_from(["girder", "impact", "RFC-0001"]).unwrap();
        match cli.command {
            Some(Commands::Impact(args)) => {
                assert_eq!(args.artifact_id, "RFC-0001");
            }
            _ => panic!("Expected Impact command"),
        }
    }

    #[test]
    fn test_parse_checklist() {
        let cli = Cli::try_parse_from(["girder", "checklist", "ADR-0007"]).unwrap();
        match cli.command {
            Some(Commands::Checklist(args)) => {
                assert_eq!(args.artifact_id, "ADR-0007");
            }
            _ => panic!("Expected Checklist command"),
        }
    }

    #[test]
    fn test_parse_id_trims_whitespace() {
        let cli = Cli::try_parse_from(["girder", "show", " RFC-0001 "]).unwrap();
        match cli.command {
            Some(Commands::Show(args)) => {
                assert_eq!(args.artifact_id, "RFC-0001");
            }
            _ => panic!("Expected Show command"),
        }
    }
}
