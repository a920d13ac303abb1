//! Coaching and review types
//!
//! A CoachSuggestion is ephemeral: keyed to the `(node_type, node_id)`
//! that triggered it and replaced wholesale by each new request.

use serde::{Deserialize, Serialize};

use super::EntityId;
use super::graph::NodeKey;
use super::plan::NodeType;

/// One suggested adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachAction {
    /// Short imperative title
    pub title: String,

    /// Longer explanation
    pub description: String,

    /// Suggestion kind ("shrink", "reschedule", ...)
    pub suggestion_type: String,
}

/// Coaching response for one friction point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachSuggestion {
    /// Kind of the entity that triggered the suggestion
    pub node_type: NodeType,

    /// Id of the entity that triggered the suggestion
    pub node_id: EntityId,

    /// Suggested actions, in service order
    pub actions: Vec<CoachAction>,
}

impl CoachSuggestion {
    /// Composite key of the triggering entity
    pub fn node_key(&self) -> NodeKey {
        NodeKey::new(self.node_type, self.node_id)
    }
}

/// Narrative review of one date, derived server-side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    /// Narrative summary text
    pub summary: String,

    /// Suggested tweaks for tomorrow
    pub tweaks: Vec<CoachAction>,

    /// Fraction of plan items completed, 0.0..=1.0
    pub completion_rate: f64,

    /// Flow score of the reviewed date
    pub flow_score: i32,
}
