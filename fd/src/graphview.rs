//! Renderable graph derivation
//!
//! Derives a flat node/link set from the raw graph snapshot. Display ids
//! are the composite `type-id` string, so habit 1 and task 1 never
//! collide. The derivation is pure and deterministic; a structural-hash
//! cache skips recomputation when the source graph has not changed, so
//! downstream consumers can rely on a referentially stable view.

use std::collections::HashSet;
use std::hash::{DefaultHasher, Hash, Hasher};

use flowgate::{GraphResponse, NodeType, Relation};
use tracing::{debug, warn};

/// One renderable node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewNode {
    /// Composite display id, unique across kinds
    pub id: String,

    /// Human label
    pub label: String,

    /// Node kind, for styling
    pub kind: NodeType,
}

/// One renderable link between two display ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewLink {
    pub source: String,
    pub target: String,
    pub relation: Relation,
}

/// Flat node/link set ready for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphView {
    pub nodes: Vec<ViewNode>,
    pub links: Vec<ViewLink>,
}

/// Derive the renderable view from a graph snapshot
///
/// Duplicate composite keys in the node list are dropped with a warning;
/// the first occurrence wins.
pub fn assemble_view(graph: &GraphResponse) -> GraphView {
    let mut seen = HashSet::new();
    let mut nodes = Vec::with_capacity(graph.nodes.len());

    for node in &graph.nodes {
        let key = node.key();
        if !seen.insert(key) {
            warn!(%key, "duplicate graph node, dropping");
            continue;
        }
        nodes.push(ViewNode {
            id: key.to_string(),
            label: node.label.clone(),
            kind: node.kind,
        });
    }

    let links = graph
        .edges
        .iter()
        .map(|edge| ViewLink {
            source: edge.from_key().to_string(),
            target: edge.to_key().to_string(),
            relation: edge.relation,
        })
        .collect();

    GraphView { nodes, links }
}

/// Memoized view of the most recent graph snapshot
#[derive(Debug, Default)]
pub struct GraphViewCache {
    hash: Option<u64>,
    view: Option<GraphView>,
}

impl GraphViewCache {
    /// Recompute the view if the graph changed structurally
    pub fn refresh(&mut self, graph: &GraphResponse) {
        let hash = structural_hash(graph);

        if self.hash == Some(hash) && self.view.is_some() {
            debug!("refresh: graph unchanged, keeping derived view");
            return;
        }

        self.view = Some(assemble_view(graph));
        self.hash = Some(hash);
    }

    /// The current derived view, if any graph has been seen
    pub fn view(&self) -> Option<&GraphView> {
        self.view.as_ref()
    }
}

fn structural_hash(graph: &GraphResponse) -> u64 {
    let mut hasher = DefaultHasher::new();
    graph.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowgate::{GraphEdge, GraphNode};

    fn node(kind: NodeType, id: i64, label: &str) -> GraphNode {
        GraphNode {
            id,
            kind,
            label: label.to_string(),
        }
    }

    fn sample_graph() -> GraphResponse {
        GraphResponse {
            nodes: vec![
                node(NodeType::Goal, 1, "Run a marathon"),
                node(NodeType::Habit, 1, "Evening run"),
                node(NodeType::Task, 1, "Buy shoes"),
            ],
            edges: vec![GraphEdge {
                id: 1,
                user_id: 42,
                from_type: NodeType::Habit,
                from_id: 1,
                to_type: NodeType::Task,
                to_id: 1,
                relation: Relation::Triggers,
            }],
        }
    }

    #[test]
    fn test_display_ids_unique_across_kinds() {
        let view = assemble_view(&sample_graph());

        let ids: HashSet<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains("habit-1"));
        assert!(ids.contains("task-1"));
        assert!(ids.contains("goal-1"));
    }

    #[test]
    fn test_links_resolve_composite_endpoints() {
        let view = assemble_view(&sample_graph());

        assert_eq!(view.links.len(), 1);
        assert_eq!(view.links[0].source, "habit-1");
        assert_eq!(view.links[0].target, "task-1");
        assert_eq!(view.links[0].relation, Relation::Triggers);
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let graph = sample_graph();
        assert_eq!(assemble_view(&graph), assemble_view(&graph));
    }

    #[test]
    fn test_duplicate_nodes_dropped() {
        let mut graph = sample_graph();
        graph.nodes.push(node(NodeType::Habit, 1, "Evening run again"));

        let view = assemble_view(&graph);
        assert_eq!(view.nodes.len(), 3);
        // first occurrence wins
        assert_eq!(
            view.nodes.iter().find(|n| n.id == "habit-1").map(|n| n.label.as_str()),
            Some("Evening run")
        );
    }

    #[test]
    fn test_structural_hash_stable_across_clones() {
        // equal content must hash equal, or the cache would recompute
        // (and re-render downstream) on every refresh
        assert_eq!(structural_hash(&sample_graph()), structural_hash(&sample_graph().clone()));
    }

    #[test]
    fn test_structural_hash_sees_changes() {
        let mut changed = sample_graph();
        changed.nodes[0].label = "Run an ultra".to_string();

        assert_ne!(structural_hash(&sample_graph()), structural_hash(&changed));
    }

    #[test]
    fn test_cache_view_stable_for_equal_graph() {
        let mut cache = GraphViewCache::default();
        cache.refresh(&sample_graph());
        let first = cache.view().unwrap().clone();

        cache.refresh(&sample_graph());
        assert_eq!(cache.view(), Some(&first));
    }

    #[test]
    fn test_cache_recomputes_on_change() {
        let mut cache = GraphViewCache::default();
        cache.refresh(&sample_graph());
        assert_eq!(cache.view().unwrap().nodes.len(), 3);

        let mut changed = sample_graph();
        changed.nodes.push(node(NodeType::System, 2, "Fitness"));
        cache.refresh(&changed);

        assert_eq!(cache.view().unwrap().nodes.len(), 4);
    }
}
