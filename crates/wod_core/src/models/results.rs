//! Per-scene outcomes and the aggregate run summary.

use serde::Serialize;

/// Result of fetching a single scene.
#[derive(Debug, Clone, Serialize)]
pub struct SceneOutcome {
    /// Scene index that was processed.
    pub scene_index: usize,
    /// The scene's record from the list file.
    pub record: String,
    /// Whether every file for the scene was fetched.
    pub success: bool,
    /// Error message (if failed).
    pub error: Option<String>,
}

impl SceneOutcome {
    /// Create a successful outcome.
    pub fn success(scene_index: usize, record: impl Into<String>) -> Self {
        Self {
            scene_index,
            record: record.into(),
            success: true,
            error: None,
        }
    }

    /// Create a failed outcome.
    pub fn failure(
        scene_index: usize,
        record: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            scene_index,
            record: record.into(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Aggregate result of a fetch run, in submission order.
///
/// Serialized to JSON at the end of a run so callers can script on the
/// counts instead of the (always-zero) exit code.
#[derive(Debug, Clone, Serialize)]
pub struct FetchSummary {
    /// Number of scenes dispatched.
    pub attempted: usize,
    /// Scenes fully fetched.
    pub succeeded: usize,
    /// Scenes that failed at any point.
    pub failed: usize,
    /// Per-scene outcomes, in submission order.
    pub outcomes: Vec<SceneOutcome>,
}

impl FetchSummary {
    /// Build a summary from per-scene outcomes.
    pub fn from_outcomes(outcomes: Vec<SceneOutcome>) -> Self {
        let attempted = outcomes.len();
        let succeeded = outcomes.iter().filter(|o| o.success).count();

        Self {
            attempted,
            succeeded,
            failed: attempted - succeeded,
            outcomes,
        }
    }

    /// True when every attempted scene succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
