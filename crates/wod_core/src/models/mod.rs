//! Data models for the fetcher.
//!
//! - Scene structures (records, plans, companion-data categories)
//! - Result structures (per-scene outcomes, run summary)

mod results;
mod scene;

pub use results::{FetchSummary, SceneOutcome};
pub use scene::{derive_segment_id, DataCategory, SceneRecord, ScenePlan};
