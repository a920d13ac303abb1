//! In-memory gateway double for tests
//!
//! Behaves like the real service for the flows the client exercises:
//! plans are generated on demand from a seeded item template, completes
//! and skips mutate item status and experience, and suggestions echo the
//! node key they were asked about. Every call is counted so tests can
//! assert on traffic, and failure injection covers the no-partial-state
//! contract.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::client::{FlowApi, PlanLookup};
use crate::domain::{
    CoachAction, CoachSuggestion, DayPlan, EntityId, Gamification, GraphResponse, Habit, NewHabit, NewTask,
    NodeType, PlanItem, PlanStatus, ReviewSummary, Task, UserId,
};
use crate::error::GatewayError;

/// Per-operation call counters
#[derive(Debug, Default, Clone, Copy)]
pub struct CallCounts {
    pub logins: u32,
    pub plan_fetches: u32,
    pub plan_generates: u32,
    pub completes: u32,
    pub skips: u32,
    pub gamification_fetches: u32,
    pub graph_fetches: u32,
    pub habit_lists: u32,
    pub task_lists: u32,
    pub habit_creates: u32,
    pub task_creates: u32,
    pub reviews: u32,
    pub suggestions: u32,
}

struct MockState {
    user_id: UserId,
    plans: HashMap<(UserId, NaiveDate), DayPlan>,
    template: Vec<(NodeType, EntityId, PlanStatus)>,
    habits: Vec<Habit>,
    tasks: Vec<Task>,
    graph: GraphResponse,
    xp: u64,
    streak_days: u32,
    flow_streak: u32,
    next_id: EntityId,
    counts: CallCounts,
    last_skip_reason: Option<String>,
    fail_mutations: bool,
    fail_plan_fetches: bool,
}

impl MockState {
    fn take_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn injected_failure() -> GatewayError {
        GatewayError::Api {
            status: 500,
            message: "injected failure".to_string(),
        }
    }

    fn find_item(&mut self, user_id: UserId, plan_item_id: EntityId) -> Option<&mut PlanItem> {
        self.plans
            .values_mut()
            .filter(|plan| plan.user_id == user_id)
            .flat_map(|plan| plan.items.iter_mut())
            .find(|item| item.id == plan_item_id)
    }
}

/// In-memory stand-in for the Flow service
pub struct MockGateway {
    inner: Mutex<MockState>,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    /// A mock service with user 42 and an empty library
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MockState {
                user_id: 42,
                plans: HashMap::new(),
                template: Vec::new(),
                habits: Vec::new(),
                tasks: Vec::new(),
                graph: GraphResponse::default(),
                xp: 0,
                streak_days: 1,
                flow_streak: 0,
                next_id: 1,
                counts: CallCounts::default(),
                last_skip_reason: None,
                fail_mutations: false,
                fail_plan_fetches: false,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().expect("mock gateway state poisoned")
    }

    /// Insert a fully-formed plan, keyed by its owner and date
    pub fn seed_plan(&self, plan: DayPlan) {
        let mut state = self.state();
        state.plans.insert((plan.user_id, plan.date), plan);
    }

    /// Items every generated plan starts with
    pub fn set_plan_template(&self, template: Vec<(NodeType, EntityId, PlanStatus)>) {
        self.state().template = template;
    }

    /// Seed the habit/task library returned by the list endpoints
    pub fn set_library(&self, habits: Vec<Habit>, tasks: Vec<Task>) {
        let mut state = self.state();
        state.habits = habits;
        state.tasks = tasks;
    }

    /// Seed the relationship graph
    pub fn set_graph(&self, graph: GraphResponse) {
        self.state().graph = graph;
    }

    /// Snapshot of the per-operation call counters
    pub fn counts(&self) -> CallCounts {
        self.state().counts
    }

    /// Reason recorded by the most recent skip
    pub fn last_skip_reason(&self) -> Option<String> {
        self.state().last_skip_reason.clone()
    }

    /// Make complete/skip fail with a server error, without mutating
    pub fn fail_mutations(&self, fail: bool) {
        self.state().fail_mutations = fail;
    }

    /// Make plan fetches fail with a server error (not a 404)
    pub fn fail_plan_fetches(&self, fail: bool) {
        self.state().fail_plan_fetches = fail;
    }
}

#[async_trait]
impl FlowApi for MockGateway {
    async fn dev_login(&self) -> Result<UserId, GatewayError> {
        let mut state = self.state();
        state.counts.logins += 1;
        Ok(state.user_id)
    }

    async fn fetch_plan(&self, user_id: UserId, date: NaiveDate) -> Result<PlanLookup, GatewayError> {
        let mut state = self.state();
        state.counts.plan_fetches += 1;

        if state.fail_plan_fetches {
            return Err(MockState::injected_failure());
        }

        match state.plans.get(&(user_id, date)) {
            Some(plan) => Ok(PlanLookup::Found(plan.clone())),
            None => Ok(PlanLookup::Missing),
        }
    }

    async fn generate_plan(&self, user_id: UserId, date: NaiveDate) -> Result<DayPlan, GatewayError> {
        let mut state = self.state();
        state.counts.plan_generates += 1;

        if let Some(existing) = state.plans.get(&(user_id, date)) {
            debug!(%date, "generate_plan: plan already exists");
            return Ok(existing.clone());
        }

        let plan_id = state.take_id();
        let items = state
            .template
            .clone()
            .into_iter()
            .enumerate()
            .map(|(order, (node_type, node_id, status))| PlanItem {
                id: state.take_id(),
                node_type,
                node_id,
                status,
                scheduled_order: Some(order as i32 + 1),
                scheduled_window_start: None,
                scheduled_window_end: None,
                anchor: None,
            })
            .collect();

        let plan = DayPlan {
            id: plan_id,
            user_id,
            date,
            generated_at: date.and_time(NaiveTime::MIN),
            flow_score: 0,
            notes: None,
            items,
        };

        state.plans.insert((user_id, date), plan.clone());
        Ok(plan)
    }

    async fn complete_item(&self, user_id: UserId, plan_item_id: EntityId) -> Result<(), GatewayError> {
        let mut state = self.state();
        state.counts.completes += 1;

        if state.fail_mutations {
            return Err(MockState::injected_failure());
        }

        let found = state
            .find_item(user_id, plan_item_id)
            .map(|item| item.status = PlanStatus::Done)
            .is_some();

        if !found {
            return Err(GatewayError::NotFound);
        }

        state.xp += 10;
        Ok(())
    }

    async fn skip_item(
        &self,
        user_id: UserId,
        plan_item_id: EntityId,
        reason: Option<&str>,
    ) -> Result<(), GatewayError> {
        let mut state = self.state();
        state.counts.skips += 1;

        if state.fail_mutations {
            return Err(MockState::injected_failure());
        }

        let found = state
            .find_item(user_id, plan_item_id)
            .map(|item| item.status = PlanStatus::Skipped)
            .is_some();

        if !found {
            return Err(GatewayError::NotFound);
        }

        state.last_skip_reason = reason.map(str::to_string);
        Ok(())
    }

    async fn gamification(&self, _user_id: UserId, date: NaiveDate) -> Result<Gamification, GatewayError> {
        let mut state = self.state();
        state.counts.gamification_fetches += 1;

        Ok(Gamification {
            date,
            streak_days: state.streak_days,
            xp: state.xp,
            flow_streak: state.flow_streak,
        })
    }

    async fn graph(&self, _user_id: UserId) -> Result<GraphResponse, GatewayError> {
        let mut state = self.state();
        state.counts.graph_fetches += 1;
        Ok(state.graph.clone())
    }

    async fn list_habits(&self, user_id: UserId) -> Result<Vec<Habit>, GatewayError> {
        let mut state = self.state();
        state.counts.habit_lists += 1;
        Ok(state.habits.iter().filter(|h| h.user_id == user_id).cloned().collect())
    }

    async fn list_tasks(&self, user_id: UserId) -> Result<Vec<Task>, GatewayError> {
        let mut state = self.state();
        state.counts.task_lists += 1;
        Ok(state.tasks.iter().filter(|t| t.user_id == user_id).cloned().collect())
    }

    async fn create_habit(&self, user_id: UserId, habit: NewHabit) -> Result<Habit, GatewayError> {
        let mut state = self.state();
        state.counts.habit_creates += 1;

        let stored = Habit {
            id: state.take_id(),
            user_id,
            system_id: habit.system_id,
            name: habit.name,
            soft_window_start: habit.soft_window_start,
            soft_window_end: habit.soft_window_end,
            energy_tag: habit.energy_tag,
            recurrence_rule: habit.recurrence_rule,
            anchor_event: habit.anchor_event,
        };

        state.habits.push(stored.clone());
        Ok(stored)
    }

    async fn create_task(&self, user_id: UserId, task: NewTask) -> Result<Task, GatewayError> {
        let mut state = self.state();
        state.counts.task_creates += 1;

        let stored = Task {
            id: state.take_id(),
            user_id,
            habit_id: task.habit_id,
            title: task.title,
            difficulty: task.difficulty,
            est_minutes: task.est_minutes,
            priority: task.priority,
            energy_tag: task.energy_tag,
            is_recurring: task.is_recurring,
            active: task.active,
        };

        state.tasks.push(stored.clone());
        Ok(stored)
    }

    async fn daily_review(&self, user_id: UserId, date: NaiveDate) -> Result<ReviewSummary, GatewayError> {
        let mut state = self.state();
        state.counts.reviews += 1;

        let (done, total, flow_score) = match state.plans.get(&(user_id, date)) {
            Some(plan) => {
                let done = plan.items.iter().filter(|i| i.status == PlanStatus::Done).count();
                (done, plan.items.len(), plan.flow_score)
            }
            None => (0, 0, 0),
        };

        let completion_rate = if total == 0 { 0.0 } else { done as f64 / total as f64 };

        Ok(ReviewSummary {
            summary: format!("Completed {done} of {total} planned items."),
            tweaks: vec![],
            completion_rate,
            flow_score,
        })
    }

    async fn request_suggestion(
        &self,
        _user_id: UserId,
        node_type: NodeType,
        node_id: EntityId,
    ) -> Result<CoachSuggestion, GatewayError> {
        let mut state = self.state();
        state.counts.suggestions += 1;

        Ok(CoachSuggestion {
            node_type,
            node_id,
            actions: vec![CoachAction {
                title: "Shrink the step".to_string(),
                description: format!("Try a two-minute version of {node_type} {node_id}."),
                suggestion_type: "shrink".to_string(),
            }],
        })
    }
}
