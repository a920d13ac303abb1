//! Coaching and review operations
//!
//! A skip is a friction signal: the caller follows it with a suggestion
//! request for the skipped item's node. The held suggestion is replaced
//! wholesale by each response; there is no merging and no retry.

use chrono::NaiveDate;
use flowgate::{EntityId, GatewayError, NodeType};
use tracing::debug;

use super::store::Session;

impl Session {
    /// Request a coaching suggestion for one entity
    ///
    /// No-op until login has completed. On success the previous
    /// suggestion, if any, is discarded entirely.
    pub async fn request_suggestion(&mut self, node_type: NodeType, node_id: EntityId) -> Result<(), GatewayError> {
        let Some(user_id) = self.user_id else {
            debug!("request_suggestion: no user yet, skipping");
            return Ok(());
        };

        let suggestion = self.api.request_suggestion(user_id, node_type, node_id).await?;
        self.suggestion = Some(suggestion);
        Ok(())
    }

    /// Fetch and hold the daily review for a date
    pub async fn fetch_daily_review(&mut self, date: NaiveDate) -> Result<(), GatewayError> {
        let Some(user_id) = self.user_id else {
            debug!("fetch_daily_review: no user yet, skipping");
            return Ok(());
        };

        self.last_review = Some(self.api.daily_review(user_id, date).await?);
        Ok(())
    }
}
