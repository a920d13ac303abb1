//! Flowgate - typed client contract for the Flow planning service
//!
//! The service owns all truth: plans, the habit/task library, the
//! relationship graph, gamification, and coaching. This crate gives
//! clients a typed seam onto it:
//!
//! - [`domain`] - serde shapes for every request and response
//! - [`FlowApi`] - one trait method per service operation
//! - [`HttpGateway`] - the real transport over HTTP
//! - [`MockGateway`] - an in-memory double for tests
//! - [`GatewayError`] - error taxonomy; not-found is a distinct kind
//!
//! # Example
//!
//! ```ignore
//! use flowgate::{FlowApi, HttpGateway, PlanLookup};
//!
//! let gateway = HttpGateway::new("http://localhost:8000", timeout)?;
//! let user_id = gateway.dev_login().await?;
//! match gateway.fetch_plan(user_id, today).await? {
//!     PlanLookup::Found(plan) => { /* render */ }
//!     PlanLookup::Missing => { let plan = gateway.generate_plan(user_id, today).await?; }
//! }
//! ```

mod client;
pub mod domain;
mod error;
mod http;
pub mod mock;

pub use client::{FlowApi, PlanLookup};
pub use domain::{
    CoachAction, CoachSuggestion, DayPlan, EntityId, Gamification, GraphEdge, GraphNode, GraphResponse, Habit,
    Identified, NewHabit, NewTask, NodeKey, NodeType, PlanAnchor, PlanItem, PlanStatus, Relation, ReviewSummary,
    Task, UserId,
};
pub use error::GatewayError;
pub use http::HttpGateway;
pub use mock::{CallCounts, MockGateway};
