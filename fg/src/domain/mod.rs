//! Domain types for the Flow planning service
//!
//! Typed shapes for everything the gateway sends and receives: day plans
//! and their items, the habit/task library, the relationship graph, the
//! gamification snapshot, and coaching output.

mod coach;
mod gamification;
mod graph;
mod library;
mod plan;

pub use coach::{CoachAction, CoachSuggestion, ReviewSummary};
pub use gamification::Gamification;
pub use graph::{GraphEdge, GraphNode, GraphResponse, NodeKey, Relation};
pub use library::{Habit, Identified, NewHabit, NewTask, Task};
pub use plan::{DayPlan, NodeType, PlanAnchor, PlanItem, PlanStatus};

/// Opaque positive integer id assigned by the service
pub type EntityId = i64;

/// Id of the authenticated user
pub type UserId = i64;
