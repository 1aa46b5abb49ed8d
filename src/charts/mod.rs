//! Chart series data
//!
//! Proxies the analytics backend for pie/bar series and normalizes its
//! heterogeneous payload shapes into uniform `{id, label, value}` points.
//! Any upstream failure is absorbed into a fixed fallback series.

pub mod handler;
pub mod service;
pub mod types;

pub use handler::{charts_router, ChartsState};
pub use service::ChartDataService;
pub use types::{ChartPoint, ChartResponse, ChartType};
