//! Session state container
//!
//! One `Session` per authenticated session: it owns the client's copy of
//! every server-derived value and is the single place that copy is
//! written. The service stays authoritative; everything here is a cache
//! that operations overwrite with fully-formed values.

use std::collections::HashMap;
use std::sync::Arc;

use flowgate::{
    CoachSuggestion, DayPlan, EntityId, FlowApi, Gamification, GatewayError, GraphResponse, Habit, NodeType,
    PlanItem, ReviewSummary, Task, UserId,
};
use tracing::{debug, info};

use crate::graphview::{GraphView, GraphViewCache};

/// Client-side state for one authenticated session
///
/// All operations no-op until [`Session::init`] has populated the user
/// id; the UI layer may call handlers before bootstrap finishes.
pub struct Session {
    pub(crate) api: Arc<dyn FlowApi>,
    pub(crate) user_id: Option<UserId>,
    pub(crate) day_plan: Option<DayPlan>,
    pub(crate) gamification: Option<Gamification>,
    pub(crate) graph: Option<GraphResponse>,
    pub(crate) graph_view: GraphViewCache,
    pub(crate) last_review: Option<ReviewSummary>,
    pub(crate) suggestion: Option<CoachSuggestion>,
    pub(crate) habits: HashMap<EntityId, Habit>,
    pub(crate) tasks: HashMap<EntityId, Task>,
    pub(crate) plan_loading: bool,
}

impl Session {
    /// Create an empty session over a gateway
    pub fn new(api: Arc<dyn FlowApi>) -> Self {
        Self {
            api,
            user_id: None,
            day_plan: None,
            gamification: None,
            graph: None,
            graph_view: GraphViewCache::default(),
            last_review: None,
            suggestion: None,
            habits: HashMap::new(),
            tasks: HashMap::new(),
            plan_loading: false,
        }
    }

    /// Obtain the session user via development-mode login
    pub async fn init(&mut self) -> Result<(), GatewayError> {
        let user_id = self.api.dev_login().await?;
        self.user_id = Some(user_id);
        info!(user_id, "session initialized");
        Ok(())
    }

    /// Fetch the relationship graph and refresh the derived view
    pub async fn fetch_graph(&mut self) -> Result<(), GatewayError> {
        let Some(user_id) = self.user_id else {
            debug!("fetch_graph: no user yet, skipping");
            return Ok(());
        };

        let graph = self.api.graph(user_id).await?;
        self.graph_view.refresh(&graph);
        self.graph = Some(graph);
        Ok(())
    }

    /// Resolve a plan item's display label from the entity library
    ///
    /// Habit and task items resolve to their library entry; goal and
    /// system items (and any unresolvable id) fall back to the synthetic
    /// `"{node_type} {node_id}"` placeholder.
    pub fn item_label(&self, item: &PlanItem) -> String {
        let resolved = match item.node_type {
            NodeType::Habit => self.habits.get(&item.node_id).map(|habit| habit.name.clone()),
            NodeType::Task => self.tasks.get(&item.node_id).map(|task| task.title.clone()),
            NodeType::Goal | NodeType::System => None,
        };

        resolved.unwrap_or_else(|| {
            debug!(node_type = %item.node_type, node_id = item.node_id, "item_label: unresolved, using placeholder");
            format!("{} {}", item.node_type, item.node_id)
        })
    }

    // === Read accessors ===

    /// Id of the session user, once login completed
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// The loaded day plan
    pub fn day_plan(&self) -> Option<&DayPlan> {
        self.day_plan.as_ref()
    }

    /// The latest gamification snapshot
    pub fn gamification(&self) -> Option<&Gamification> {
        self.gamification.as_ref()
    }

    /// The latest raw graph snapshot
    pub fn graph(&self) -> Option<&GraphResponse> {
        self.graph.as_ref()
    }

    /// The derived renderable graph view
    pub fn graph_view(&self) -> Option<&GraphView> {
        self.graph_view.view()
    }

    /// The most recent daily review
    pub fn last_review(&self) -> Option<&ReviewSummary> {
        self.last_review.as_ref()
    }

    /// The coaching suggestion for the most recently coached item
    pub fn suggestion(&self) -> Option<&CoachSuggestion> {
        self.suggestion.as_ref()
    }

    /// Habits keyed by id
    pub fn habits(&self) -> &HashMap<EntityId, Habit> {
        &self.habits
    }

    /// Tasks keyed by id
    pub fn tasks(&self) -> &HashMap<EntityId, Task> {
        &self.tasks
    }

    /// Whether a plan fetch (or generate fallback) is in flight
    pub fn plan_loading(&self) -> bool {
        self.plan_loading
    }
}
