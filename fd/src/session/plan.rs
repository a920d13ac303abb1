//! Plan synchronization
//!
//! The service owns plan truth. Fetch falls through to generation only on
//! the explicit "no plan yet" tag; complete and skip never touch local
//! status - after a successful acknowledgment the plan and then the
//! gamification snapshot are re-fetched, so the client always re-derives
//! state from the authoritative source.

use chrono::NaiveDate;
use flowgate::{DayPlan, EntityId, GatewayError, PlanItem, PlanLookup, PlanStatus, UserId};
use tracing::{debug, info};

use super::store::Session;

impl Session {
    /// Load the plan for a date, generating one if none exists yet
    ///
    /// No-op until login has completed. Generation is only attempted on
    /// the explicit not-found signal, never speculatively, so the server
    /// cannot be raced into duplicate plans for one date. Any other
    /// failure propagates unchanged and leaves the prior plan in place.
    pub async fn fetch_plan(&mut self, date: NaiveDate) -> Result<(), GatewayError> {
        let Some(user_id) = self.user_id else {
            debug!("fetch_plan: no user yet, skipping");
            return Ok(());
        };

        self.plan_loading = true;
        let outcome = Self::load_plan(self.api.as_ref(), user_id, date).await;
        self.plan_loading = false;

        self.day_plan = Some(outcome?);
        Ok(())
    }

    async fn load_plan(
        api: &dyn flowgate::FlowApi,
        user_id: UserId,
        date: NaiveDate,
    ) -> Result<DayPlan, GatewayError> {
        match api.fetch_plan(user_id, date).await? {
            PlanLookup::Found(plan) => Ok(plan),
            PlanLookup::Missing => {
                info!(%date, "no plan for date, generating");
                api.generate_plan(user_id, date).await
            }
        }
    }

    /// Refresh the gamification snapshot for a date
    pub async fn fetch_gamification(&mut self, date: NaiveDate) -> Result<(), GatewayError> {
        let Some(user_id) = self.user_id else {
            debug!("fetch_gamification: no user yet, skipping");
            return Ok(());
        };

        self.gamification = Some(self.api.gamification(user_id, date).await?);
        Ok(())
    }

    /// Mark a plan item done, then re-derive plan and gamification
    ///
    /// No-op unless a user and a loaded plan are present. The refresh
    /// runs only after the mutation is acknowledged; plan first, then
    /// gamification.
    pub async fn complete_item(&mut self, plan_item_id: EntityId) -> Result<(), GatewayError> {
        let (Some(user_id), Some(date)) = (self.user_id, self.day_plan.as_ref().map(|plan| plan.date)) else {
            debug!(plan_item_id, "complete_item: session not ready, skipping");
            return Ok(());
        };

        self.api.complete_item(user_id, plan_item_id).await?;

        self.fetch_plan(date).await?;
        self.fetch_gamification(date).await?;
        Ok(())
    }

    /// Skip a plan item, then re-derive plan and gamification
    ///
    /// Same preconditions and refresh contract as [`Session::complete_item`].
    pub async fn skip_item(&mut self, plan_item_id: EntityId, reason: Option<&str>) -> Result<(), GatewayError> {
        let (Some(user_id), Some(date)) = (self.user_id, self.day_plan.as_ref().map(|plan| plan.date)) else {
            debug!(plan_item_id, "skip_item: session not ready, skipping");
            return Ok(());
        };

        self.api.skip_item(user_id, plan_item_id, reason).await?;

        self.fetch_plan(date).await?;
        self.fetch_gamification(date).await?;
        Ok(())
    }
}

/// Today-view grouping of a plan's open items
///
/// The first ready item is the single "now" move, the remaining ready
/// items are queued, and planned items wait on their anchors.
#[derive(Debug, Default)]
pub struct TodayView<'a> {
    pub now: Vec<&'a PlanItem>,
    pub ready: Vec<&'a PlanItem>,
    pub later: Vec<&'a PlanItem>,
}

/// Group a plan's items into the now/ready/later sections
pub fn group_for_today(plan: &DayPlan) -> TodayView<'_> {
    let mut ready: Vec<&PlanItem> = plan.items.iter().filter(|item| item.status == PlanStatus::Ready).collect();

    let now = if ready.is_empty() { vec![] } else { vec![ready.remove(0)] };
    let later = plan
        .items
        .iter()
        .filter(|item| item.status == PlanStatus::Planned)
        .collect();

    TodayView { now, ready, later }
}
