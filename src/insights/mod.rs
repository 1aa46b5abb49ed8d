//! Dashboard overview data
//!
//! Read-only metrics, priorities, and recommendations pulled from the
//! analytics backend, with static fallback lists when it is unreachable.

pub mod handler;
pub mod service;

pub use handler::{insights_router, InsightsState};
pub use service::{InsightsService, OverviewKind};
