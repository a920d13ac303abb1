//! Gamification snapshot
//!
//! Per-date aggregate computed by the service; read-only for the client.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Streak and experience counters for one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gamification {
    /// Date the snapshot covers
    pub date: NaiveDate,

    /// Consecutive days with at least one completion
    pub streak_days: u32,

    /// Cumulative experience points
    pub xp: u64,

    /// Consecutive days above the flow threshold
    pub flow_streak: u32,
}
