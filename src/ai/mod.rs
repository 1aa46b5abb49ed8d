//! AI sample generation
//!
//! Asks a chat-completions API for realistic sample dashboard content
//! (metrics, priorities, recommendations, chart label sets) and falls back
//! to locally randomized samples when the API is unconfigured or fails.

pub mod generator;
pub mod handler;

pub use generator::{SampleGenerator, SampleKind};
pub use handler::{ai_router, AiState};
