//! HTTP gateway implementation
//!
//! Implements the FlowApi trait over the service's REST endpoints. The
//! wire layer is the only place status codes exist: a 404 becomes either
//! `PlanLookup::Missing` (plan fetch) or `GatewayError::NotFound`, and
//! every other non-success status becomes `GatewayError::Api`. No retry,
//! no backoff; failures propagate to the caller unchanged.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::client::{FlowApi, PlanLookup};
use crate::domain::{
    CoachSuggestion, DayPlan, EntityId, Gamification, GraphResponse, Habit, NewHabit, NewTask, NodeType,
    ReviewSummary, Task, UserId,
};
use crate::error::GatewayError;

/// HTTP client for the Flow planning service
pub struct HttpGateway {
    base_url: String,
    http: Client,
}

impl HttpGateway {
    /// Create a gateway against a base URL with a request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(%base_url, ?timeout, "new: called");

        let http = Client::builder().timeout(timeout).build().map_err(GatewayError::Network)?;

        Ok(Self { base_url, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a response into a domain value or a typed error
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!("decode: not found");
            return Err(GatewayError::NotFound);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "decode: service error");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

/// Acknowledgment body returned by mutating endpoints
#[derive(Debug, Deserialize)]
struct Ack {
    status: String,
}

/// Response body of the dev login endpoint
#[derive(Debug, Deserialize)]
struct LoginResponse {
    id: UserId,
}

/// Response body of the plan generation endpoint
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    plan: DayPlan,
}

#[async_trait]
impl FlowApi for HttpGateway {
    async fn dev_login(&self) -> Result<UserId, GatewayError> {
        debug!("dev_login: called");
        let response = self.http.post(self.url("/auth/devlogin")).send().await?;
        let login: LoginResponse = Self::decode(response).await?;
        debug!(user_id = login.id, "dev_login: ok");
        Ok(login.id)
    }

    async fn fetch_plan(&self, user_id: UserId, date: NaiveDate) -> Result<PlanLookup, GatewayError> {
        debug!(user_id, %date, "fetch_plan: called");
        let response = self
            .http
            .get(self.url("/plan"))
            .query(&[("user_id", user_id.to_string()), ("plan_date", date.to_string())])
            .send()
            .await?;

        match Self::decode::<DayPlan>(response).await {
            Ok(plan) => Ok(PlanLookup::Found(plan)),
            Err(GatewayError::NotFound) => {
                debug!(%date, "fetch_plan: no plan for date");
                Ok(PlanLookup::Missing)
            }
            Err(e) => Err(e),
        }
    }

    async fn generate_plan(&self, user_id: UserId, date: NaiveDate) -> Result<DayPlan, GatewayError> {
        debug!(user_id, %date, "generate_plan: called");
        let response = self
            .http
            .post(self.url("/plan/generate"))
            .query(&[("user_id", user_id.to_string()), ("plan_date", date.to_string())])
            .send()
            .await?;

        let generated: GenerateResponse = Self::decode(response).await?;
        Ok(generated.plan)
    }

    async fn complete_item(&self, user_id: UserId, plan_item_id: EntityId) -> Result<(), GatewayError> {
        debug!(user_id, plan_item_id, "complete_item: called");
        let response = self
            .http
            .post(self.url("/plan/complete"))
            .query(&[("user_id", user_id.to_string())])
            .json(&serde_json::json!({ "plan_item_id": plan_item_id }))
            .send()
            .await?;

        let ack: Ack = Self::decode(response).await?;
        debug!(status = %ack.status, "complete_item: acknowledged");
        Ok(())
    }

    async fn skip_item(
        &self,
        user_id: UserId,
        plan_item_id: EntityId,
        reason: Option<&str>,
    ) -> Result<(), GatewayError> {
        debug!(user_id, plan_item_id, ?reason, "skip_item: called");
        let response = self
            .http
            .post(self.url("/plan/skip"))
            .query(&[("user_id", user_id.to_string())])
            .json(&serde_json::json!({ "plan_item_id": plan_item_id, "reason": reason }))
            .send()
            .await?;

        let ack: Ack = Self::decode(response).await?;
        debug!(status = %ack.status, "skip_item: acknowledged");
        Ok(())
    }

    async fn gamification(&self, user_id: UserId, date: NaiveDate) -> Result<Gamification, GatewayError> {
        debug!(user_id, %date, "gamification: called");
        let response = self
            .http
            .get(self.url("/gamification/today"))
            .query(&[("user_id", user_id.to_string()), ("target_date", date.to_string())])
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn graph(&self, user_id: UserId) -> Result<GraphResponse, GatewayError> {
        debug!(user_id, "graph: called");
        let response = self
            .http
            .get(self.url("/graph"))
            .query(&[("user_id", user_id.to_string())])
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn list_habits(&self, user_id: UserId) -> Result<Vec<Habit>, GatewayError> {
        debug!(user_id, "list_habits: called");
        let response = self.http.get(self.url(&format!("/habit/{user_id}"))).send().await?;
        Self::decode(response).await
    }

    async fn list_tasks(&self, user_id: UserId) -> Result<Vec<Task>, GatewayError> {
        debug!(user_id, "list_tasks: called");
        let response = self.http.get(self.url(&format!("/task/{user_id}"))).send().await?;
        Self::decode(response).await
    }

    async fn create_habit(&self, user_id: UserId, habit: NewHabit) -> Result<Habit, GatewayError> {
        debug!(user_id, name = %habit.name, "create_habit: called");
        let mut body = serde_json::to_value(&habit)?;
        body["user_id"] = serde_json::json!(user_id);

        let response = self.http.post(self.url("/habit")).json(&body).send().await?;
        Self::decode(response).await
    }

    async fn create_task(&self, user_id: UserId, task: NewTask) -> Result<Task, GatewayError> {
        debug!(user_id, title = %task.title, "create_task: called");
        let mut body = serde_json::to_value(&task)?;
        body["user_id"] = serde_json::json!(user_id);

        let response = self.http.post(self.url("/task")).json(&body).send().await?;
        Self::decode(response).await
    }

    async fn daily_review(&self, user_id: UserId, date: NaiveDate) -> Result<ReviewSummary, GatewayError> {
        debug!(user_id, %date, "daily_review: called");
        let response = self
            .http
            .get(self.url("/review/daily"))
            .query(&[("user_id", user_id.to_string()), ("target_date", date.to_string())])
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn request_suggestion(
        &self,
        user_id: UserId,
        node_type: NodeType,
        node_id: EntityId,
    ) -> Result<CoachSuggestion, GatewayError> {
        debug!(user_id, %node_type, node_id, "request_suggestion: called");
        let response = self
            .http
            .post(self.url("/coach/suggest"))
            .json(&serde_json::json!({
                "user_id": user_id,
                "node_type": node_type,
                "node_id": node_id,
            }))
            .send()
            .await?;

        Self::decode(response).await
    }
}
