//! Cycle detection over the directed reference graph.
//!
//! DFS with an explicit path stack, run once per artifact as root. A
//! back-edge into the stack emits the slice from the re-encountered node to
//! the current node as one cycle. Roots do not share visited state, so a
//! logical cycle is reported once per member node (as a rotation); callers
//! wanting unique cycles must dedup themselves.

use super::GraphView;
use crate::domain::{ArtifactId, ReferenceType};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Longest cycle still classified as a warning.
///
/// Every healthy bidirectional link is a 2-node cycle in the directed
/// graph, so short cycles are routine; only longer ones point at a real
/// dependency tangle.
const WARNING_MAX_LEN: usize = 3;

/// How bad a detected cycle is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleSeverity {
    /// Short cycle, usually just a link and its inverse.
    Warning,

    /// A cycle of more than three artifacts.
    Critical,
}

impl fmt::Display for CycleSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Warning => "warning",
            Self::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

/// One detected cycle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleReport {
    /// The cycle's member IDs in traversal order, without repeating the
    /// first node at the end.
    pub cycle: Vec<ArtifactId>,

    /// Severity classification by cycle length.
    pub severity: CycleSeverity,
}

pub(super) fn find_cycles(view: &GraphView) -> Vec<CycleReport> {
    let mut reports = Vec::new();
    for artifact in &view.artifacts {
        let Some(&start) = view.node_map.get(&artifact.id) else {
            continue;
        };
        let mut visited = HashSet::new();
        let mut stack = Vec::new();
        dfs(&view.graph, start, &mut visited, &mut stack, &mut reports);
    }
    reports
}

fn dfs(
    graph: &DiGraph<ArtifactId, ReferenceType>,
    node: NodeIndex,
    visited: &mut HashSet<NodeIndex>,
    stack: &mut Vec<NodeIndex>,
    reports: &mut Vec<CycleReport>,
) {
    if let Some(pos) = stack.iter().position(|&n| n == node) {
        let cycle: Vec<ArtifactId> = stack[pos..].iter().map(|&n| graph[n].clone()).collect();
        let severity = if cycle.len() <= WARNING_MAX_LEN {
            CycleSeverity::Warning
        } else {
            CycleSeverity::Critical
        };
        reports.push(CycleReport { cycle, severity });
        return;
    }
    if !visited.insert(node) {
        return;
    }
    stack.push(node);
    // neighbors() walks edges newest-first; reverse for insertion order.
    let mut neighbors: Vec<NodeIndex> = graph.neighbors(node).collect();
    neighbors.reverse();
    for next in neighbors {
        dfs(graph, next, visited, stack, reports);
    }
    stack.pop();
}
