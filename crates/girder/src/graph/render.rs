//! Textual graph renderers.
//!
//! Two notations are produced from the same [`GraphView`]:
//!
//! - A flow-diagram notation: node IDs are sanitized (hyphens become
//!   underscores), each node is a titled box, and a trailing styling block
//!   assigns every node a class named after its artifact type.
//! - DOT: node color is keyed by artifact type (RFC blue, ADR green,
//!   decomposition orange) and node style by status (tentative statuses
//!   dashed, retired statuses gray-filled, everything else solid).
//!
//! Both renderers declare nodes in the view's artifact order and edges in
//! insertion order, so output is deterministic for a given store state.

use super::GraphView;
use crate::domain::{ArtifactStatus, ArtifactType};
use petgraph::visit::EdgeRef;

pub(super) fn render_mermaid(view: &GraphView) -> String {
    let mut out = String::from("graph TD\n");
    for artifact in &view.artifacts {
        out.push_str(&format!(
            "    {}[\"{}: {}\"]\n",
            sanitize_id(artifact.id.as_str()),
            artifact.id,
            artifact.title.replace('"', "'")
        ));
    }
    for edge in view.graph.edge_references() {
        out.push_str(&format!(
            "    {} --> {} : {}\n",
            sanitize_id(view.graph[edge.source()].as_str()),
            sanitize_id(view.graph[edge.target()].as_str()),
            edge.weight()
        ));
    }
    if !view.artifacts.is_empty() {
        out.push_str("    classDef rfc fill:#dbeafe,stroke:#1e40af\n");
        out.push_str("    classDef adr fill:#dcfce7,stroke:#166534\n");
        out.push_str("    classDef decomposition fill:#ffedd5,stroke:#9a3412\n");
        for artifact in &view.artifacts {
            out.push_str(&format!(
                "    class {} {}\n",
                sanitize_id(artifact.id.as_str()),
                artifact.artifact_type
            ));
        }
    }
    out
}

pub(super) fn render_dot(view: &GraphView) -> String {
    let mut out = String::from("digraph artifacts {\n  rankdir=LR;\n");
    for artifact in &view.artifacts {
        out.push_str(&format!(
            "  \"{}\" [label=\"{}: {}\", color={}, {}];\n",
            artifact.id,
            artifact.id,
            dot_escape(&artifact.title),
            type_color(artifact.artifact_type),
            status_attribute(artifact.status)
        ));
    }
    for edge in view.graph.edge_references() {
        out.push_str(&format!(
            "  \"{}\" -> \"{}\" [label=\"{}\"];\n",
            view.graph[edge.source()],
            view.graph[edge.target()],
            edge.weight()
        ));
    }
    out.push_str("}\n");
    out
}

fn sanitize_id(id: &str) -> String {
    id.replace('-', "_")
}

fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn type_color(artifact_type: ArtifactType) -> &'static str {
    match artifact_type {
        ArtifactType::Rfc => "blue",
        ArtifactType::Adr => "green",
        ArtifactType::Decomposition => "orange",
    }
}

fn status_attribute(status: ArtifactStatus) -> &'static str {
    if status.is_tentative() {
        "style=dashed"
    } else if status.is_retired() {
        "fillcolor=gray"
    } else {
        "style=solid"
    }
}
