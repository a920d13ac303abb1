//! Gateway contract for the Flow planning service
//!
//! One trait method per service operation. Implementations exist for the
//! real HTTP service ([`crate::HttpGateway`]) and for tests
//! ([`crate::MockGateway`]); holders work with `Arc<dyn FlowApi>`.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    CoachSuggestion, DayPlan, EntityId, Gamification, GraphResponse, Habit, NewHabit, NewTask, NodeType,
    ReviewSummary, Task, UserId,
};
use crate::error::GatewayError;

/// Outcome of a plan fetch
///
/// "No plan generated yet for this date" is an expected state that drives
/// the generate fallback, so it is a tag here rather than an error.
/// Transport and server failures stay in `Err(..)`.
#[derive(Debug, Clone)]
pub enum PlanLookup {
    /// A plan exists for the requested date
    Found(DayPlan),
    /// No plan exists yet; the caller may request generation
    Missing,
}

impl PlanLookup {
    /// Unwrap into the plan, if one was found
    pub fn found(self) -> Option<DayPlan> {
        match self {
            Self::Found(plan) => Some(plan),
            Self::Missing => None,
        }
    }
}

/// Client contract for the Flow planning service
///
/// All operations are scoped to one authenticated user; the service holds
/// the only authoritative copy of every entity.
#[async_trait]
pub trait FlowApi: Send + Sync {
    /// Development-mode login; returns the id of the session user
    async fn dev_login(&self) -> Result<UserId, GatewayError>;

    /// Fetch the plan for a date, distinguishing "none yet" from failure
    async fn fetch_plan(&self, user_id: UserId, date: NaiveDate) -> Result<PlanLookup, GatewayError>;

    /// Ask the service to generate a plan for a date
    async fn generate_plan(&self, user_id: UserId, date: NaiveDate) -> Result<DayPlan, GatewayError>;

    /// Mark a plan item done
    async fn complete_item(&self, user_id: UserId, plan_item_id: EntityId) -> Result<(), GatewayError>;

    /// Skip a plan item, optionally recording why
    async fn skip_item(
        &self,
        user_id: UserId,
        plan_item_id: EntityId,
        reason: Option<&str>,
    ) -> Result<(), GatewayError>;

    /// Fetch the gamification snapshot for a date
    async fn gamification(&self, user_id: UserId, date: NaiveDate) -> Result<Gamification, GatewayError>;

    /// Fetch the full relationship graph
    async fn graph(&self, user_id: UserId) -> Result<GraphResponse, GatewayError>;

    /// List the user's habits
    async fn list_habits(&self, user_id: UserId) -> Result<Vec<Habit>, GatewayError>;

    /// List the user's tasks
    async fn list_tasks(&self, user_id: UserId) -> Result<Vec<Task>, GatewayError>;

    /// Create a habit; returns the stored entity with its assigned id
    async fn create_habit(&self, user_id: UserId, habit: NewHabit) -> Result<Habit, GatewayError>;

    /// Create a task; returns the stored entity with its assigned id
    async fn create_task(&self, user_id: UserId, task: NewTask) -> Result<Task, GatewayError>;

    /// Fetch the daily review for a date
    async fn daily_review(&self, user_id: UserId, date: NaiveDate) -> Result<ReviewSummary, GatewayError>;

    /// Request a coaching suggestion for one entity
    async fn request_suggestion(
        &self,
        user_id: UserId,
        node_type: NodeType,
        node_id: EntityId,
    ) -> Result<CoachSuggestion, GatewayError>;
}
