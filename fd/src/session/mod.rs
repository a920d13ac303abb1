//! Session state and synchronization
//!
//! The `Session` is the single source of truth for the client's view of
//! one user's day: the loaded plan, gamification snapshot, graph, library
//! maps, and the latest coaching output. Operations are grouped by
//! concern:
//!
//! - [`store`] - the state container, login, and label resolution
//! - plan synchronization (fetch-or-generate, complete, skip)
//! - coaching (suggestions, daily review)
//! - library (listing, normalization, creates)

mod coach;
mod library;
mod plan;
pub mod store;

pub use plan::{TodayView, group_for_today};
pub use store::Session;
