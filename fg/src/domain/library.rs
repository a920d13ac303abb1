//! Library entities: habits and tasks
//!
//! Habits belong to a system; tasks optionally anchor to a habit. Both are
//! created through the gateway and read back as ordered listings that the
//! client normalizes into id-keyed maps.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::EntityId;

/// Entities with a unique numeric id, usable as a normalization key
pub trait Identified {
    fn id(&self) -> EntityId;
}

/// A recurring practice attached to a system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier
    pub id: EntityId,

    /// Owning user
    pub user_id: EntityId,

    /// System this habit serves
    pub system_id: EntityId,

    /// Display name
    pub name: String,

    /// Suggested (non-binding) start of the daily window
    pub soft_window_start: Option<NaiveTime>,

    /// Suggested end of the daily window
    pub soft_window_end: Option<NaiveTime>,

    /// Energy level this habit suits ("low", "deep", ...)
    pub energy_tag: Option<String>,

    /// Recurrence rule ("daily", "weekdays", ...)
    pub recurrence_rule: Option<String>,

    /// External event this habit anchors to
    pub anchor_event: Option<String>,
}

impl Identified for Habit {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Payload for creating a habit; the service assigns the id
#[derive(Debug, Clone, Serialize)]
pub struct NewHabit {
    pub system_id: EntityId,
    pub name: String,
    pub soft_window_start: Option<NaiveTime>,
    pub soft_window_end: Option<NaiveTime>,
    pub energy_tag: Option<String>,
    pub recurrence_rule: Option<String>,
    pub anchor_event: Option<String>,
}

impl NewHabit {
    /// A habit with just a system and a name; everything else optional
    pub fn new(system_id: EntityId, name: impl Into<String>) -> Self {
        Self {
            system_id,
            name: name.into(),
            soft_window_start: None,
            soft_window_end: None,
            energy_tag: None,
            recurrence_rule: None,
            anchor_event: None,
        }
    }
}

/// A one-off or recurring piece of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: EntityId,

    /// Owning user
    pub user_id: EntityId,

    /// Habit this task follows; None means no anchor
    pub habit_id: Option<EntityId>,

    /// Display title
    pub title: String,

    /// Ordinal difficulty, 1..=5
    pub difficulty: u8,

    /// Estimated duration in minutes
    pub est_minutes: Option<u32>,

    /// Scheduling priority, 0 is lowest
    pub priority: i32,

    /// Energy level this task suits
    pub energy_tag: Option<String>,

    /// Whether the task re-enters the plan after completion
    pub is_recurring: bool,

    /// Whether the task is eligible for planning at all
    pub active: bool,
}

impl Identified for Task {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Payload for creating a task; the service assigns the id
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub habit_id: Option<EntityId>,
    pub title: String,
    pub difficulty: u8,
    pub est_minutes: Option<u32>,
    pub priority: i32,
    pub energy_tag: Option<String>,
    pub is_recurring: bool,
    pub active: bool,
}

impl NewTask {
    /// A task with service-default difficulty and priority
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            habit_id: None,
            title: title.into(),
            difficulty: 3,
            est_minutes: None,
            priority: 1,
            energy_tag: None,
            is_recurring: false,
            active: true,
        }
    }

    /// Anchor the task after a habit (builder pattern)
    pub fn after_habit(mut self, habit_id: EntityId) -> Self {
        self.habit_id = Some(habit_id);
        self
    }
}
