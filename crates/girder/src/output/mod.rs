//! Output formatting for CLI commands.
//!
//! This module provides utilities for formatting command output in both
//! human-readable text format and JSON format for programmatic use.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, icons)

pub mod color;

use crate::domain::Artifact;
use crate::graph::CycleReport;
use crate::impact::{DependentRecord, DeprecationChecklist, ImpactReport};
use crate::links::LinkSet;
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use color::{error, info, success, warning};

use color::{
    bold, colored_status_icon, colored_type_icon, colorize_id, colorize_priority,
    colorize_severity, colorize_status, cyan, dimmed, yellow,
};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Transitive dependents deeper than this are no longer indented further.
const MAX_VISUAL_DEPTH: u32 = 10;

/// Configuration for output formatting.
///
/// This struct holds settings that control how output is formatted,
/// including terminal width limits, ASCII fallback mode, and color output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use ASCII-only icons instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with explicit values.
    #[must_use]
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `GIRDER_MAX_WIDTH`: Maximum content width (default: 80)
    /// - `GIRDER_ASCII`: Set to "1" or "true" for ASCII-only icons (default: false)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `GIRDER_COLOR`: Set to "0" or "false" to disable colors (default: true)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("GIRDER_MAX_WIDTH").ok(),
            env::var("GIRDER_ASCII").ok(),
            env::var("NO_COLOR").is_ok(),
            env::var("GIRDER_COLOR").ok(),
        )
    }

    fn from_vars(
        max_width: Option<String>,
        ascii: Option<String>,
        no_color: bool,
        color: Option<String>,
    ) -> Self {
        let max_width = match max_width {
            Some(s) if !s.is_empty() => match s.parse() {
                Ok(width) => width,
                Err(_) => {
                    tracing::warn!(
                        env_var = "GIRDER_MAX_WIDTH",
                        value = %s,
                        default = DEFAULT_MAX_CONTENT_WIDTH,
                        "Invalid value, using default"
                    );
                    DEFAULT_MAX_CONTENT_WIDTH
                }
            },
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = match ascii {
            Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Some(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Some(v) => {
                tracing::warn!(
                    env_var = "GIRDER_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            None => false,
        };

        // Respect NO_COLOR standard (https://no-color.org/)
        // Also support GIRDER_COLOR for explicit control
        let use_colors = !no_color
            && color
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_ascii: false,
            use_colors: true,
        }
    }
}

// ============================================================================
// Terminal Width Detection
// ============================================================================

/// Get the current terminal width, falling back to default if detection fails.
fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH as usize)
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print a single artifact summary line in the specified format
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_artifact(artifact: &Artifact, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_artifact_text(&mut handle, artifact, &config),
        OutputMode::Json => write_json(&mut handle, artifact),
    }
}

/// Print a list of artifacts in the specified format
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_artifacts(artifacts: &[Artifact], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_artifacts_text(&mut handle, artifacts, &config),
        OutputMode::Json => write_json(&mut handle, artifacts),
    }
}

/// Print an artifact with its full details and links (for show command)
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_artifact_details(
    artifact: &Artifact,
    links: &LinkSet,
    mode: OutputMode,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_artifact_details_text(&mut handle, artifact, links, &config),
        OutputMode::Json => write_json(
            &mut handle,
            &serde_json::json!({ "artifact": artifact, "links": links }),
        ),
    }
}

/// Print the links touching one artifact
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_link_set(id: &str, links: &LinkSet, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_link_set_text(&mut handle, id, links, &config),
        OutputMode::Json => write_json(&mut handle, links),
    }
}

/// Print detected circular dependencies
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_cycles(cycles: &[CycleReport], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_cycles_text(&mut handle, cycles, &config),
        OutputMode::Json => write_json(&mut handle, cycles),
    }
}

/// Print an impact analysis report
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_impact(report: &ImpactReport, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_impact_text(&mut handle, report, &config),
        OutputMode::Json => write_json(&mut handle, report),
    }
}

/// Print a deprecation checklist
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_checklist(checklist: &DeprecationChecklist, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_checklist_text(&mut handle, checklist, &config),
        OutputMode::Json => write_json(&mut handle, checklist),
    }
}

/// Print a simple message
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_message(msg: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", msg)
}

/// Print a JSON-formatted result for any serializable value
///
/// # Errors
///
/// Returns an error if serialization or writing to stdout fails.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value)
}

fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{}", json)
}

// ============================================================================
// Text Formatting
// ============================================================================

fn print_artifact_text<W: Write>(
    w: &mut W,
    artifact: &Artifact,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {}  {}  {}  {}",
        colored_status_icon(artifact.status, config),
        colorize_id(artifact.id.as_str(), config),
        colored_type_icon(artifact.artifact_type, config),
        colorize_status(artifact.status, config),
        artifact.title
    )?;

    if let Some(ref owner) = artifact.owner {
        writeln!(w, "  {} {}", dimmed("Owner:", config), owner)?;
    }

    Ok(())
}

fn print_artifacts_text<W: Write>(
    w: &mut W,
    artifacts: &[Artifact],
    config: &OutputConfig,
) -> io::Result<()> {
    if artifacts.is_empty() {
        writeln!(w, "No artifacts found.")?;
        return Ok(());
    }

    writeln!(w, "Found {} artifact(s):", artifacts.len())?;
    writeln!(w)?;

    for artifact in artifacts {
        writeln!(
            w,
            "{} {}  {}  {}  {}",
            colored_status_icon(artifact.status, config),
            colorize_id(artifact.id.as_str(), config),
            colored_type_icon(artifact.artifact_type, config),
            colorize_status(artifact.status, config),
            artifact.title
        )?;
    }

    Ok(())
}

fn print_artifact_details_text<W: Write>(
    w: &mut W,
    artifact: &Artifact,
    links: &LinkSet,
    config: &OutputConfig,
) -> io::Result<()> {
    let terminal_width = get_terminal_width();
    let content_width = terminal_width.min(config.max_width);

    // Header: status icon and ID, then the wrapped title indented below
    writeln!(
        w,
        "{} {}",
        colored_status_icon(artifact.status, config),
        colorize_id(artifact.id.as_str(), config)
    )?;
    for line in wrap_text(&artifact.title, content_width.saturating_sub(2)) {
        writeln!(w, "  {line}")?;
    }
    writeln!(w)?;

    // Metadata line
    let type_display = format!(
        "{} {}",
        colored_type_icon(artifact.artifact_type, config),
        artifact.artifact_type
    );
    writeln!(
        w,
        "{}  {}    {}  {}",
        dimmed("Type:", config),
        type_display,
        dimmed("Status:", config),
        colorize_status(artifact.status, config)
    )?;

    if let Some(ref owner) = artifact.owner {
        writeln!(w, "{} {}", dimmed("Owner:", config), owner)?;
    }

    if !artifact.tags.is_empty() {
        writeln!(w, "{} {}", dimmed("Tags:", config), artifact.tags.join(", "))?;
    }

    writeln!(
        w,
        "{} {}",
        dimmed("Updated:", config),
        artifact.updated_at.format("%Y-%m-%d %H:%M")
    )?;

    // Outgoing links section
    if !links.outgoing.is_empty() {
        writeln!(w)?;
        writeln!(
            w,
            "{} ({}):",
            bold("Outgoing", config),
            links.outgoing.len()
        )?;
        for link in &links.outgoing {
            writeln!(
                w,
                "  {} {} ({})",
                cyan("→", config),
                colorize_id(link.target_id.as_str(), config),
                link.link_type
            )?;
        }
    }

    // Incoming links section
    if !links.incoming.is_empty() {
        writeln!(w)?;
        writeln!(
            w,
            "{} ({}):",
            bold("Incoming", config),
            links.incoming.len()
        )?;
        for link in &links.incoming {
            writeln!(
                w,
                "  {} {} ({})",
                yellow("←", config),
                colorize_id(link.source_id.as_str(), config),
                link.link_type
            )?;
        }
    }

    Ok(())
}

fn print_link_set_text<W: Write>(
    w: &mut W,
    id: &str,
    links: &LinkSet,
    config: &OutputConfig,
) -> io::Result<()> {
    if links.outgoing.is_empty() && links.incoming.is_empty() {
        writeln!(w, "{} has no links", id)?;
        return Ok(());
    }

    if links.outgoing.is_empty() {
        writeln!(w, "{} {} has no outgoing links", cyan("→", config), id)?;
    } else {
        writeln!(
            w,
            "{} Outgoing links of {} ({}):",
            cyan("→", config),
            colorize_id(id, config),
            links.outgoing.len()
        )?;
        for link in &links.outgoing {
            writeln!(
                w,
                "  └── {} ({})",
                colorize_id(link.target_id.as_str(), config),
                link.link_type
            )?;
        }
    }

    if links.incoming.is_empty() {
        writeln!(w, "{} No artifacts link to {}", yellow("←", config), id)?;
    } else {
        writeln!(
            w,
            "{} Incoming links to {} ({}):",
            yellow("←", config),
            colorize_id(id, config),
            links.incoming.len()
        )?;
        for link in &links.incoming {
            writeln!(
                w,
                "  └── {} ({})",
                colorize_id(link.source_id.as_str(), config),
                link.link_type
            )?;
        }
    }

    Ok(())
}

fn print_cycles_text<W: Write>(
    w: &mut W,
    cycles: &[CycleReport],
    config: &OutputConfig,
) -> io::Result<()> {
    if cycles.is_empty() {
        writeln!(w, "No circular dependencies found.")?;
        return Ok(());
    }

    writeln!(w, "Found {} circular dependency(ies):", cycles.len())?;
    writeln!(w)?;

    for report in cycles {
        let mut path: Vec<&str> = report.cycle.iter().map(|id| id.as_str()).collect();
        // Repeat the first node so the loop reads closed
        if let Some(first) = path.first().copied() {
            path.push(first);
        }
        writeln!(
            w,
            "  [{}] {}",
            colorize_severity(report.severity, config),
            path.join(" -> ")
        )?;
    }

    Ok(())
}

fn describe_dependent(record: &DependentRecord, config: &OutputConfig) -> String {
    match (record.artifact_type, record.status) {
        (Some(artifact_type), Some(status)) => format!(
            "{} ({} {}, criticality {})",
            colorize_id(record.id.as_str(), config),
            artifact_type,
            status,
            record.criticality
        ),
        _ => format!(
            "{} (not in store)",
            colorize_id(record.id.as_str(), config)
        ),
    }
}

fn print_impact_text<W: Write>(
    w: &mut W,
    report: &ImpactReport,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "Impact analysis for {}",
        colorize_id(report.artifact_id.as_str(), config)
    )?;
    writeln!(w)?;
    writeln!(w, "{} {} / 100", dimmed("Risk score:", config), report.risk_score)?;
    writeln!(w, "{}  {}", dimmed("Max depth:", config), report.max_depth)?;

    if report.direct_dependents.is_empty() && report.transitive_dependents.is_empty() {
        writeln!(w)?;
        writeln!(w, "No artifacts depend on this.")?;
        return Ok(());
    }

    if !report.direct_dependents.is_empty() {
        writeln!(w)?;
        writeln!(
            w,
            "{} ({}):",
            bold("Direct dependents", config),
            report.direct_dependents.len()
        )?;
        for record in &report.direct_dependents {
            writeln!(w, "  └── {}", describe_dependent(record, config))?;
        }
    }

    if !report.transitive_dependents.is_empty() {
        writeln!(w)?;
        writeln!(
            w,
            "{} ({}):",
            bold("Transitive dependents", config),
            report.transitive_dependents.len()
        )?;
        for record in &report.transitive_dependents {
            // Indent by depth, capped so deep chains stay readable
            let visual_depth = record.depth.min(MAX_VISUAL_DEPTH);
            let indent = "  ".repeat(visual_depth.saturating_sub(1) as usize);
            let depth_indicator = if record.depth > MAX_VISUAL_DEPTH {
                format!(" [depth: {}]", record.depth)
            } else {
                format!(" (depth: {})", record.depth)
            };
            writeln!(
                w,
                "  {}└── {}{}",
                indent,
                describe_dependent(record, config),
                depth_indicator
            )?;
        }
    }

    Ok(())
}

fn print_checklist_text<W: Write>(
    w: &mut W,
    checklist: &DeprecationChecklist,
    config: &OutputConfig,
) -> io::Result<()> {
    if checklist.tasks.is_empty() {
        writeln!(
            w,
            "No dependents; {} can be deprecated without follow-up work.",
            colorize_id(checklist.artifact_id.as_str(), config)
        )?;
        return Ok(());
    }

    writeln!(
        w,
        "Deprecation checklist for {} ({} task(s)):",
        colorize_id(checklist.artifact_id.as_str(), config),
        checklist.tasks.len()
    )?;
    writeln!(w)?;

    for task in &checklist.tasks {
        writeln!(
            w,
            "  [{}] {}",
            colorize_priority(task.priority, config),
            task.action
        )?;
    }

    Ok(())
}

/// Wrap text to fit within a given width, preserving existing line breaks.
/// Uses textwrap to handle edge cases like long words (URLs, file paths).
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width)
                    .into_iter()
                    .map(|s| s.into_owned())
                    .collect()
            }
        })
        .collect()
}
