//! Day plan types
//!
//! A DayPlan is the service's schedule for one user on one calendar date
//! (one plan per user per date, enforced server-side). Plan items point at
//! library entities by `(node_type, node_id)`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::EntityId;
use super::graph::NodeKey;

/// Kind of entity a plan item or graph node refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Goal,
    System,
    Habit,
    Task,
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Goal => write!(f, "goal"),
            Self::System => write!(f, "system"),
            Self::Habit => write!(f, "habit"),
            Self::Task => write!(f, "task"),
        }
    }
}

/// Plan item status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Scheduled but waiting on an anchor or window
    #[default]
    Planned,
    /// Unblocked, can be started now
    Ready,
    /// Started but not finished
    InProgress,
    /// Completed
    Done,
    /// Skipped by the user
    Skipped,
}

impl PlanStatus {
    /// Check whether the item still needs attention today
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Planned | Self::Ready | Self::InProgress)
    }

    /// Check whether the item reached a final state (done or skipped)
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Done | Self::Skipped)
    }
}

impl std::fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Planned => write!(f, "planned"),
            Self::Ready => write!(f, "ready"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Done => write!(f, "done"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// How a plan item becomes actionable; absent means no anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanAnchor {
    /// A clock-time window
    Time,
    /// A preceding habit
    Habit,
    /// A preceding task
    Task,
}

/// One scheduled unit of a day's plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanItem {
    /// Unique identifier
    pub id: EntityId,

    /// Kind of entity this item references
    pub node_type: NodeType,

    /// Id of the referenced entity, resolved against the library of the
    /// matching kind
    pub node_id: EntityId,

    /// Current status
    pub status: PlanStatus,

    /// Position in the day's suggested ordering
    pub scheduled_order: Option<i32>,

    /// Soft window start (non-binding)
    pub scheduled_window_start: Option<NaiveTime>,

    /// Soft window end; may be open-ended even when a start is set
    pub scheduled_window_end: Option<NaiveTime>,

    /// What unlocks this item
    pub anchor: Option<PlanAnchor>,
}

impl PlanItem {
    /// Composite key of the referenced entity
    pub fn node_key(&self) -> NodeKey {
        NodeKey::new(self.node_type, self.node_id)
    }
}

/// A user's plan for one calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Unique identifier
    pub id: EntityId,

    /// Owning user
    pub user_id: EntityId,

    /// Calendar date this plan covers (the plan's natural key)
    pub date: NaiveDate,

    /// When the service generated the plan
    pub generated_at: NaiveDateTime,

    /// Server-computed daily quality metric; opaque to the client
    pub flow_score: i32,

    /// Free-text notes
    pub notes: Option<String>,

    /// Scheduled items, in service order
    #[serde(default)]
    pub items: Vec<PlanItem>,
}

impl DayPlan {
    /// Look up an item by its id
    pub fn item(&self, item_id: EntityId) -> Option<&PlanItem> {
        self.items.iter().find(|item| item.id == item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: EntityId, status: PlanStatus) -> PlanItem {
        PlanItem {
            id,
            node_type: NodeType::Habit,
            node_id: 1,
            status,
            scheduled_order: None,
            scheduled_window_start: None,
            scheduled_window_end: None,
            anchor: None,
        }
    }

    #[test]
    fn test_node_type_serde_round_trip() {
        let json = serde_json::to_string(&NodeType::Habit).unwrap();
        assert_eq!(json, "\"habit\"");

        let back: NodeType = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(back, NodeType::System);
    }

    #[test]
    fn test_plan_status_predicates() {
        assert!(PlanStatus::Planned.is_open());
        assert!(PlanStatus::Ready.is_open());
        assert!(PlanStatus::InProgress.is_open());
        assert!(!PlanStatus::Done.is_open());

        assert!(PlanStatus::Done.is_settled());
        assert!(PlanStatus::Skipped.is_settled());
        assert!(!PlanStatus::Ready.is_settled());
    }

    #[test]
    fn test_plan_status_wire_form() {
        let json = serde_json::to_string(&PlanStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn test_day_plan_deserialize() {
        let json = r#"{
            "id": 3,
            "user_id": 42,
            "date": "2024-05-01",
            "generated_at": "2024-05-01T06:00:00",
            "flow_score": 70,
            "notes": null,
            "items": [
                {
                    "id": 7,
                    "node_type": "habit",
                    "node_id": 1,
                    "status": "ready",
                    "scheduled_order": 1,
                    "scheduled_window_start": "18:00:00",
                    "scheduled_window_end": null,
                    "anchor": "time"
                }
            ]
        }"#;

        let plan: DayPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(plan.items.len(), 1);
        assert_eq!(plan.items[0].status, PlanStatus::Ready);
        assert_eq!(plan.items[0].anchor, Some(PlanAnchor::Time));
        assert!(plan.items[0].scheduled_window_end.is_none());
    }

    #[test]
    fn test_day_plan_item_lookup() {
        let plan = DayPlan {
            id: 1,
            user_id: 42,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            generated_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap(),
            flow_score: 0,
            notes: None,
            items: vec![item(7, PlanStatus::Ready), item(9, PlanStatus::Planned)],
        };

        assert_eq!(plan.item(9).map(|i| i.status), Some(PlanStatus::Planned));
        assert!(plan.item(99).is_none());
    }

    #[test]
    fn test_plan_item_node_key() {
        let key = item(7, PlanStatus::Ready).node_key();
        assert_eq!(key.to_string(), "habit-1");
    }
}
