//! Pulseboard - Business analytics dashboard backend
//!
//! HTTP API behind a browser dashboard showing key metrics, task priorities,
//! AI-style recommendations, and user-configurable pie/bar charts.
//!
//! ## Modules
//!
//! - [`records`]: per-entity in-memory CRUD collections (the dashboard's
//!   user-defined charts, metrics, priorities, and recommendations)
//! - [`charts`]: chart series data proxied from the analytics backend
//! - [`insights`]: read-only overview feeds proxied from the backend
//! - [`ai`]: sample content generation through a chat-completions API
//! - [`upstream`]: shared backend client and the `live`/`fallback` source tag
//! - [`server`]: router assembly and the serve loop
//! - [`config`]: configuration management
//!
//! Data served from the backend or the completion API is best-effort: any
//! upstream failure is absorbed and replaced with fallback data, tagged with
//! `source: "fallback"` in the response.

pub mod ai;
pub mod charts;
pub mod config;
pub mod error;
pub mod insights;
pub mod records;
pub mod server;
pub mod upstream;

pub use config::PulseboardConfig;
pub use error::{Error, Result};
