//! Relationship graph construction and analysis.
//!
//! This module builds graph views over the artifact store:
//! - Textual rendering in two notations (flow diagram and DOT)
//! - Rooted subgraph pruning via undirected reachability
//! - Cycle detection (DFS) with severity classification
//!
//! Every call rebuilds its view from current store state; there is no
//! persisted or cached graph.

use crate::domain::{Artifact, ArtifactId, ReferenceType};
use crate::error::Result;
use crate::store::ArtifactStore;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet, VecDeque};

pub mod cycles;
pub mod render;

pub use cycles::{CycleReport, CycleSeverity};

/// Output notation for [`GraphBuilder::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphFormat {
    /// Flow-diagram notation with per-type styling classes.
    #[default]
    Mermaid,

    /// DOT digraph notation with per-type colors and per-status styles.
    Dot,
}

/// Options for graph rendering.
#[derive(Debug, Clone, Default)]
pub struct GraphOptions {
    /// Output notation.
    pub format: GraphFormat,

    /// Restrict output to artifacts connected to this root (in either
    /// direction). `None` renders the whole store.
    pub root: Option<ArtifactId>,
}

/// A materialized view of the relationship graph.
///
/// Nodes carry artifact IDs, edges carry the stored reference type, and
/// edges whose target is not in the view (dangling references, pruned
/// artifacts) are dropped. `artifacts` is sorted by ID and drives node
/// declaration order in rendered output.
struct GraphView {
    artifacts: Vec<Artifact>,
    graph: DiGraph<ArtifactId, ReferenceType>,
    node_map: HashMap<ArtifactId, NodeIndex>,
}

impl GraphView {
    fn from_artifacts(artifacts: Vec<Artifact>) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();
        for artifact in &artifacts {
            let index = graph.add_node(artifact.id.clone());
            node_map.insert(artifact.id.clone(), index);
        }
        for artifact in &artifacts {
            let Some(&source) = node_map.get(&artifact.id) else {
                continue;
            };
            for reference in &artifact.references {
                if let Some(&target) = node_map.get(&reference.target_id) {
                    graph.add_edge(source, target, reference.reference_type);
                }
            }
        }
        Self {
            artifacts,
            graph,
            node_map,
        }
    }

    /// Node indices reachable from `root` treating every edge as
    /// undirected, including the root itself. Empty if the root is not in
    /// the view.
    fn reachable_undirected(&self, root: &ArtifactId) -> HashSet<NodeIndex> {
        let mut keep = HashSet::new();
        let Some(&start) = self.node_map.get(root) else {
            return keep;
        };
        keep.insert(start);
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for neighbor in self.graph.neighbors_undirected(node) {
                if keep.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        keep
    }

    /// The induced subgraph on the artifacts connected to `root`.
    fn rooted_at(&self, root: &ArtifactId) -> Self {
        let keep = self.reachable_undirected(root);
        let kept: Vec<Artifact> = self
            .artifacts
            .iter()
            .filter(|a| {
                self.node_map
                    .get(&a.id)
                    .is_some_and(|index| keep.contains(index))
            })
            .cloned()
            .collect();
        Self::from_artifacts(kept)
    }
}

/// Read-only graph queries over the artifact store.
pub struct GraphBuilder<'a> {
    store: &'a dyn ArtifactStore,
}

impl<'a> GraphBuilder<'a> {
    /// Create a builder over the given store.
    pub fn new(store: &'a dyn ArtifactStore) -> Self {
        Self { store }
    }

    async fn view(&self, root: Option<&ArtifactId>) -> Result<GraphView> {
        let artifacts = self.store.list(&Default::default()).await?;
        let full = GraphView::from_artifacts(artifacts);
        Ok(match root {
            Some(root_id) => full.rooted_at(root_id),
            None => full,
        })
    }

    /// Render the relationship graph in the requested notation.
    ///
    /// With a root set, only artifacts connected to the root (following
    /// references in either direction) are rendered; everything else is
    /// absent from the output entirely, IDs and titles included. A root
    /// that does not exist yields a header-only graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn generate(&self, options: &GraphOptions) -> Result<String> {
        let view = self.view(options.root.as_ref()).await?;
        Ok(match options.format {
            GraphFormat::Mermaid => render::render_mermaid(&view),
            GraphFormat::Dot => render::render_dot(&view),
        })
    }

    /// IDs of every artifact connected to `root` in either direction,
    /// excluding the root itself, sorted by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn connected_artifacts(&self, root: &ArtifactId) -> Result<Vec<ArtifactId>> {
        let view = self.view(None).await?;
        let keep = view.reachable_undirected(root);
        let mut ids: Vec<ArtifactId> = keep
            .into_iter()
            .map(|index| view.graph[index].clone())
            .filter(|id| id != root)
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Find reference cycles in the directed graph.
    ///
    /// Because link creation installs an inverse reference on the target,
    /// every healthy bidirectional link shows up here as a 2-node cycle
    /// with severity [`CycleSeverity::Warning`]; only longer cycles are
    /// classified [`CycleSeverity::Critical`]. Each artifact is searched
    /// as its own DFS root and reports are not deduplicated across roots,
    /// so one logical cycle can appear once per member node.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn detect_cycles(&self) -> Result<Vec<CycleReport>> {
        let view = self.view(None).await?;
        Ok(cycles::find_cycles(&view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArtifactStatus, Reference};
    use crate::store::MemoryStore;
    use chrono::Utc;

    fn artifact(id: &str, title: &str, references: Vec<Reference>) -> Artifact {
        let id = ArtifactId::new(id);
        Artifact {
            artifact_type: id.artifact_type().unwrap(),
            status: ArtifactStatus::Draft,
            title: title.to_string(),
            owner: None,
            tags: vec![],
            updated_at: Utc::now(),
            references,
            id,
        }
    }

    fn reference(target: &str, reference_type: ReferenceType) -> Reference {
        let target_id = ArtifactId::new(target);
        Reference {
            target_type: target_id.artifact_type().unwrap(),
            target_id,
            reference_type,
        }
    }

    async fn store_with(artifacts: Vec<Artifact>) -> MemoryStore {
        let mut store = MemoryStore::new();
        for artifact in artifacts {
            store.save(artifact).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn rooted_graph_excludes_unconnected_artifacts_entirely() {
        let store = store_with(vec![
            artifact(
                "RFC-0001",
                "Root",
                vec![reference("ADR-0001", ReferenceType::Implements)],
            ),
            artifact("ADR-0001", "Connected", vec![]),
            artifact("RFC-0002", "Isolated Island", vec![]),
        ])
        .await;

        let builder = GraphBuilder::new(&store);
        let output = builder
            .generate(&GraphOptions {
                format: GraphFormat::Mermaid,
                root: Some(ArtifactId::new("RFC-0001")),
            })
            .await
            .unwrap();

        assert!(output.contains("RFC_0001"));
        assert!(output.contains("ADR_0001"));
        assert!(!output.contains("RFC_0002"));
        assert!(!output.contains("RFC-0002"));
        assert!(!output.contains("Isolated Island"));
    }

    #[tokio::test]
    async fn rooted_graph_follows_incoming_edges_too() {
        // RFC-0002 points at the root; reachability is undirected.
        let store = store_with(vec![
            artifact("RFC-0001", "Root", vec![]),
            artifact(
                "RFC-0002",
                "Pointer",
                vec![reference("RFC-0001", ReferenceType::DependsOn)],
            ),
        ])
        .await;

        let builder = GraphBuilder::new(&store);
        let output = builder
            .generate(&GraphOptions {
                format: GraphFormat::Mermaid,
                root: Some(ArtifactId::new("RFC-0001")),
            })
            .await
            .unwrap();

        assert!(output.contains("RFC_0002"));
    }

    #[tokio::test]
    async fn rooted_graph_with_missing_root_is_header_only() {
        let store = store_with(vec![artifact("RFC-0001", "Lonely", vec![])]).await;

        let builder = GraphBuilder::new(&store);
        let output = builder
            .generate(&GraphOptions {
                format: GraphFormat::Mermaid,
                root: Some(ArtifactId::new("RFC-9999")),
            })
            .await
            .unwrap();

        assert_eq!(output, "graph TD\n");
    }

    #[tokio::test]
    async fn root_with_no_edges_still_renders_itself() {
        let store = store_with(vec![
            artifact("RFC-0001", "Root", vec![]),
            artifact("RFC-0002", "Other", vec![]),
        ])
        .await;

        let builder = GraphBuilder::new(&store);
        let output = builder
            .generate(&GraphOptions {
                format: GraphFormat::Mermaid,
                root: Some(ArtifactId::new("RFC-0001")),
            })
            .await
            .unwrap();

        assert!(output.contains("RFC_0001[\"RFC-0001: Root\"]"));
        assert!(!output.contains("RFC_0002"));
    }

    #[tokio::test]
    async fn connected_artifacts_spans_both_directions_transitively() {
        // RFC-0001 -> ADR-0001 <- RFC-0002, DECOMP-0001 isolated.
        let store = store_with(vec![
            artifact(
                "RFC-0001",
                "A",
                vec![reference("ADR-0001", ReferenceType::Implements)],
            ),
            artifact("ADR-0001", "B", vec![]),
            artifact(
                "RFC-0002",
                "C",
                vec![reference("ADR-0001", ReferenceType::RelatesTo)],
            ),
            artifact("DECOMP-0001", "D", vec![]),
        ])
        .await;

        let builder = GraphBuilder::new(&store);
        let connected = builder
            .connected_artifacts(&ArtifactId::new("RFC-0001"))
            .await
            .unwrap();

        let ids: Vec<&str> = connected.iter().map(ArtifactId::as_str).collect();
        assert_eq!(ids, vec!["ADR-0001", "RFC-0002"]);
    }

    #[tokio::test]
    async fn connected_artifacts_of_missing_root_is_empty() {
        let store = store_with(vec![artifact("RFC-0001", "A", vec![])]).await;

        let builder = GraphBuilder::new(&store);
        let connected = builder
            .connected_artifacts(&ArtifactId::new("ADR-0404"))
            .await
            .unwrap();
        assert!(connected.is_empty());
    }

    #[tokio::test]
    async fn dangling_references_produce_no_edges() {
        let store = store_with(vec![artifact(
            "RFC-0001",
            "Holder",
            vec![reference("ADR-0404", ReferenceType::DependsOn)],
        )])
        .await;

        let builder = GraphBuilder::new(&store);
        let output = builder
            .generate(&GraphOptions::default())
            .await
            .unwrap();

        assert!(output.contains("RFC_0001"));
        assert!(!output.contains("ADR_0404"));
        assert!(!output.contains("-->"));
    }
}
