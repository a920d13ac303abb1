//! Relationship graph types
//!
//! The graph is a directed multigraph over heterogeneous nodes (goals,
//! systems, habits, tasks). Bare ids collide across kinds, so identity is
//! always the composite `(type, id)` key.

use serde::{Deserialize, Serialize};

use super::EntityId;
use super::plan::NodeType;

/// Edge relation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Supports,
    Triggers,
    Follows,
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Supports => write!(f, "supports"),
            Self::Triggers => write!(f, "triggers"),
            Self::Follows => write!(f, "follows"),
        }
    }
}

/// Composite node identity, unique across kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub kind: NodeType,
    pub id: EntityId,
}

impl NodeKey {
    pub fn new(kind: NodeType, id: EntityId) -> Self {
        Self { kind, id }
    }
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.kind, self.id)
    }
}

/// One node of the relationship graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphNode {
    /// Id within the node's own kind; only unique together with `kind`
    pub id: EntityId,

    /// Node kind
    #[serde(rename = "type")]
    pub kind: NodeType,

    /// Display label resolved by the service
    pub label: String,
}

impl GraphNode {
    /// Composite identity of this node
    pub fn key(&self) -> NodeKey {
        NodeKey::new(self.kind, self.id)
    }
}

/// One directed edge of the relationship graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Unique identifier
    pub id: EntityId,

    /// Owning user
    pub user_id: EntityId,

    pub from_type: NodeType,
    pub from_id: EntityId,
    pub to_type: NodeType,
    pub to_id: EntityId,

    /// Relation label carried through to derived links
    pub relation: Relation,
}

impl GraphEdge {
    /// Composite key of the edge source
    pub fn from_key(&self) -> NodeKey {
        NodeKey::new(self.from_type, self.from_id)
    }

    /// Composite key of the edge target
    pub fn to_key(&self) -> NodeKey {
        NodeKey::new(self.to_type, self.to_id)
    }
}

/// Full graph snapshot as returned by the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphResponse {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}
