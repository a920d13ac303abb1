//! Flowday - client state layer for the Flow daily planning service
//!
//! The service computes plans, flow scores, and coaching; this crate owns
//! the client side of that contract. State lives in an explicit
//! [`Session`] built over a [`flowgate::FlowApi`] gateway, and every
//! mutation re-derives state from the service rather than patching it
//! locally.
//!
//! # Modules
//!
//! - [`session`] - state container and the fetch/complete/skip flows
//! - [`normalize`] - entity listings into id-keyed maps
//! - [`graphview`] - renderable node/link derivation with memoization
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod graphview;
pub mod normalize;
pub mod session;

pub use config::Config;
pub use graphview::{GraphView, GraphViewCache, ViewLink, ViewNode, assemble_view};
pub use normalize::index_by_id;
pub use session::{Session, TodayView, group_for_today};
