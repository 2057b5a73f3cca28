//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::Result;

use super::args::{
    ChecklistArgs, CreateArgs, CyclesArgs, GraphArgs, ImpactArgs, InfoArgs, InitArgs, LinkAction,
    LinkArgs, LinksArgs, ListArgs, ShowArgs, UpdateArgs,
};
use crate::output::OutputMode;

/// Execute the init command
pub async fn execute_init(args: &InitArgs) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;

    if !args.quiet {
        println!("Initializing girder workspace...");
    }

    let result = init::init(&current_dir).await?;

    if !args.quiet {
        println!("Initialized girder in {}", result.girder_dir.display());
        println!("  Config:    {}", result.config_file.display());
        println!("  Artifacts: {}", result.artifacts_file.display());
    }

    Ok(())
}

/// Execute the info command
pub async fn execute_info(
    app: &crate::app::App,
    _args: &InfoArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::config::ARTIFACTS_FILE_NAME;
    use crate::domain::{ArtifactFilter, ArtifactType};
    use crate::output;

    let database_path = app.girder_dir().join(ARTIFACTS_FILE_NAME);

    // Count artifacts by type in a single pass
    let all_artifacts = app.store().list(&ArtifactFilter::default()).await?;
    let (rfc, adr, decomposition) =
        all_artifacts
            .iter()
            .fold((0, 0, 0), |(r, a, d), artifact| match artifact.artifact_type {
                ArtifactType::Rfc => (r + 1, a, d),
                ArtifactType::Adr => (r, a + 1, d),
                ArtifactType::Decomposition => (r, a, d + 1),
            });
    let retired = all_artifacts
        .iter()
        .filter(|a| a.status.is_retired())
        .count();

    match output_mode {
        output::OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "database_path": database_path.display().to_string(),
                "artifacts": {
                    "total": all_artifacts.len(),
                    "rfc": rfc,
                    "adr": adr,
                    "decomposition": decomposition,
                    "retired": retired
                }
            }))?;
        }
        output::OutputMode::Text => {
            println!("Girder Workspace Information");
            println!("============================");
            println!();
            println!("Database: {}", database_path.display());
            println!();
            println!(
                "Artifacts: {} total ({} RFCs, {} ADRs, {} decompositions)",
                all_artifacts.len(),
                rfc,
                adr,
                decomposition
            );
            println!("Retired:   {}", retired);
        }
    }

    Ok(())
}

/// Execute the create command
pub async fn execute_create(
    app: &mut crate::app::App,
    args: &CreateArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::domain::NewArtifact;
    use crate::output;

    let new_artifact = NewArtifact {
        artifact_type: args.artifact_type.into(),
        title: args.title.clone(),
        owner: args.owner.clone(),
        tags: args.tags.clone(),
        status: args.status.map(Into::into),
    };

    let artifact = app.store_mut().create(new_artifact).await?;
    app.save().await?;

    match output_mode {
        output::OutputMode::Json => {
            output::print_json(&artifact)?;
        }
        output::OutputMode::Text => {
            println!("Created artifact: {}", artifact.id);
        }
    }

    Ok(())
}

/// Execute the list command
pub async fn execute_list(
    app: &crate::app::App,
    args: &ListArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::domain::ArtifactFilter;
    use crate::output;

    let filter = ArtifactFilter {
        artifact_type: args.artifact_type.map(Into::into),
        status: args.status.map(Into::into),
        owner: args.owner.clone(),
        tag: args.tag.clone(),
        limit: Some(args.limit),
    };

    let artifacts = app.store().list(&filter).await?;

    output::print_artifacts(&artifacts, output_mode)?;

    Ok(())
}

/// Execute the show command
pub async fn execute_show(
    app: &crate::app::App,
    args: &ShowArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::domain::ArtifactId;
    use crate::links::{self, LinkSet};
    use crate::output;

    let artifact_id = ArtifactId::new(args.artifact_id.as_str());

    let artifact = app
        .store()
        .load(&artifact_id)
        .await?
        .ok_or_else(|| crate::error::Error::ArtifactNotFound(artifact_id.clone()))?;

    let links = LinkSet {
        incoming: links::incoming_links(app.store(), &artifact_id).await?,
        outgoing: links::outgoing_links(app.store(), &artifact_id).await?,
    };

    output::print_artifact_details(&artifact, &links, output_mode)?;

    Ok(())
}

/// Execute the update command
pub async fn execute_update(
    app: &mut crate::app::App,
    args: &UpdateArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::domain::{ArtifactId, ArtifactUpdate};
    use crate::output;

    let artifact_id = ArtifactId::new(args.artifact_id.as_str());

    let update = ArtifactUpdate {
        title: args.title.clone(),
        status: args.status.map(Into::into),
        owner: if args.no_owner {
            Some(None)
        } else {
            args.owner.clone().map(Some)
        },
        tags: args.tags.clone(),
    };

    let mut artifact = app
        .store()
        .load(&artifact_id)
        .await?
        .ok_or_else(|| crate::error::Error::ArtifactNotFound(artifact_id.clone()))?;

    artifact.apply_update(update);
    artifact.touch();

    app.store_mut().save(artifact.clone()).await?;
    app.save().await?;

    match output_mode {
        output::OutputMode::Json => {
            output::print_json(&artifact)?;
        }
        output::OutputMode::Text => {
            println!("Updated artifact: {}", artifact.id);
        }
    }

    Ok(())
}

/// Execute the link command
pub async fn execute_link(
    app: &mut crate::app::App,
    args: &LinkArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::domain::ArtifactId;
    use crate::links::LinkMaintainer;
    use crate::output;

    match &args.action {
        LinkAction::Add {
            source,
            targets,
            link_type,
        } => {
            let source_id = ArtifactId::new(source.as_str());
            let target_ids: Vec<ArtifactId> =
                targets.iter().map(|t| ArtifactId::new(t.as_str())).collect();

            // All targets are validated before any link is written.
            let outcomes = LinkMaintainer::new(app.store_mut())
                .batch_link(&source_id, &target_ids, (*link_type).into())
                .await?;
            app.save().await?;

            match output_mode {
                output::OutputMode::Json => {
                    output::print_json(&outcomes)?;
                }
                output::OutputMode::Text => {
                    for outcome in &outcomes {
                        match &outcome.warning {
                            Some(warning) => println!("Warning: {}", warning),
                            None => println!(
                                "Added link: {} --[{}]--> {}",
                                outcome.link.source_id, outcome.link.link_type, outcome.link.target_id
                            ),
                        }
                    }
                }
            }
        }
        LinkAction::Remove { source, target } => {
            let source_id = ArtifactId::new(source.as_str());
            let target_id = ArtifactId::new(target.as_str());

            LinkMaintainer::new(app.store_mut())
                .remove_link(&source_id, &target_id)
                .await?;
            app.save().await?;

            match output_mode {
                output::OutputMode::Json => {
                    output::print_json(&serde_json::json!({
                        "action": "remove",
                        "source": source,
                        "target": target,
                        "status": "success"
                    }))?;
                }
                output::OutputMode::Text => {
                    println!("Removed link: {} --> {}", source, target);
                }
            }
        }
        LinkAction::Retype {
            source,
            target,
            link_type,
        } => {
            let source_id = ArtifactId::new(source.as_str());
            let target_id = ArtifactId::new(target.as_str());

            let outcome = LinkMaintainer::new(app.store_mut())
                .update_link_type(&source_id, &target_id, (*link_type).into())
                .await?;
            app.save().await?;

            match output_mode {
                output::OutputMode::Json => {
                    output::print_json(&outcome)?;
                }
                output::OutputMode::Text => {
                    println!(
                        "Changed link type: {} --[{}]--> {}",
                        outcome.link.source_id, outcome.link.link_type, outcome.link.target_id
                    );
                }
            }
        }
    }

    Ok(())
}

/// Execute the links command
pub async fn execute_links(
    app: &crate::app::App,
    args: &LinksArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::domain::ArtifactId;
    use crate::links::{self, LinkSet};
    use crate::output;

    let artifact_id = ArtifactId::new(args.artifact_id.as_str());

    if !app.store().exists(&artifact_id).await? {
        return Err(crate::error::Error::ArtifactNotFound(artifact_id).into());
    }

    let links = LinkSet {
        incoming: links::incoming_links(app.store(), &artifact_id).await?,
        outgoing: links::outgoing_links(app.store(), &artifact_id).await?,
    };

    output::print_link_set(&args.artifact_id, &links, output_mode)?;

    Ok(())
}

/// Execute the graph command
pub async fn execute_graph(
    app: &crate::app::App,
    args: &GraphArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::domain::ArtifactId;
    use crate::graph::{GraphBuilder, GraphOptions};
    use crate::output;

    let options = GraphOptions {
        format: args.format.into(),
        root: args.root.as_ref().map(|r| ArtifactId::new(r.as_str())),
    };

    let graph = GraphBuilder::new(app.store()).generate(&options).await?;

    match output_mode {
        output::OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "format": args.format.to_string(),
                "graph": graph
            }))?;
        }
        output::OutputMode::Text => {
            // Rendered graphs carry their own trailing newline.
            print!("{}", graph);
        }
    }

    Ok(())
}

/// Execute the cycles command
pub async fn execute_cycles(
    app: &crate::app::App,
    _args: &CyclesArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::graph::GraphBuilder;
    use crate::output;

    let cycles = GraphBuilder::new(app.store()).detect_cycles().await?;

    output::print_cycles(&cycles, output_mode)?;

    Ok(())
}

/// Execute the impact command
pub async fn execute_impact(
    app: &crate::app::App,
    args: &ImpactArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::domain::ArtifactId;
    use crate::impact::ImpactAnalyzer;
    use crate::output;

    let artifact_id = ArtifactId::new(args.artifact_id.as_str());

    if !app.store().exists(&artifact_id).await? {
        return Err(crate::error::Error::ArtifactNotFound(artifact_id).into());
    }

    let report = ImpactAnalyzer::new(app.store()).analyze(&artifact_id).await?;

    output::print_impact(&report, output_mode)?;

    Ok(())
}

/// Execute the checklist command
pub async fn execute_checklist(
    app: &crate::app::App,
    args: &ChecklistArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::domain::ArtifactId;
    use crate::impact::ImpactAnalyzer;
    use crate::output;

    let artifact_id = ArtifactId::new(args.artifact_id.as_str());

    if !app.store().exists(&artifact_id).await? {
        return Err(crate::error::Error::ArtifactNotFound(artifact_id).into());
    }

    let checklist = ImpactAnalyzer::new(app.store())
        .deprecation_checklist(&artifact_id)
        .await?;

    output::print_checklist(&checklist, output_mode)?;

    Ok(())
}
