//! Fetch orchestrator: bounded fan-out over independent per-scene tasks.
//!
//! Scenes are dispatched onto the tokio runtime with a semaphore capping
//! how many run at once. Task handles are awaited in submission order, so
//! outcomes are reported in the order scenes were requested no matter how
//! completion interleaves. A scene failure is contained at its task
//! boundary and logged; the run always proceeds to the remaining scenes.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use walkdir::WalkDir;

use crate::config::Settings;
use crate::index;
use crate::models::{FetchSummary, SceneOutcome, ScenePlan};

use super::errors::RunError;
use super::scene::SceneFetcher;

/// Drives a whole fetch run.
pub struct Orchestrator {
    settings: Settings,
}

impl Orchestrator {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Fetch every requested scene and report per-scene outcomes.
    ///
    /// Fatal errors (missing scene list, index out of range, unusable
    /// target dir) end the run before anything is dispatched. Per-scene
    /// failures are folded into the summary; partial success is a normal
    /// terminal state.
    pub async fn run(&self, scene_indices: &[usize]) -> Result<FetchSummary, RunError> {
        let target_dir = PathBuf::from(&self.settings.paths.target_dir);
        fs::create_dir_all(&target_dir).map_err(|source| RunError::TargetDir {
            path: target_dir.clone(),
            source,
        })?;

        let list_path = Path::new(&self.settings.paths.scene_list);
        let records = index::resolve(scene_indices, list_path)?;

        tracing::info!(
            "Downloading training data for {} scenes...",
            scene_indices.len()
        );
        tracing::info!("Target directory: {}", target_dir.display());

        let semaphore = Arc::new(Semaphore::new(self.settings.download.max_workers));
        let fetcher = Arc::new(SceneFetcher::new(&self.settings));

        let mut tasks = Vec::with_capacity(records.len());
        for (&scene_index, record) in scene_indices.iter().zip(records.iter()) {
            let plan = ScenePlan::new(scene_index, record.clone(), target_dir.clone());
            let semaphore = Arc::clone(&semaphore);
            let fetcher = Arc::clone(&fetcher);

            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire().await.expect("semaphore closed");
                fetcher.fetch_scene(&plan).await
            });
            tasks.push((scene_index, record.clone(), handle));
        }

        let total = tasks.len();
        let mut outcomes = Vec::with_capacity(total);
        for (counter, (scene_index, record, handle)) in tasks.into_iter().enumerate() {
            let position = counter + 1;
            let outcome = match handle.await {
                Ok(Ok(())) => {
                    tracing::info!(
                        "[{}/{}] Scene {} completed successfully",
                        position,
                        total,
                        scene_index
                    );
                    SceneOutcome::success(scene_index, record.as_str())
                }
                Ok(Err(e)) => {
                    tracing::warn!(
                        "[{}/{}] Scene {} failed: {}",
                        position,
                        total,
                        scene_index,
                        e
                    );
                    SceneOutcome::failure(scene_index, record.as_str(), e.to_string())
                }
                Err(e) => {
                    tracing::warn!(
                        "[{}/{}] Scene {} task aborted: {}",
                        position,
                        total,
                        scene_index,
                        e
                    );
                    SceneOutcome::failure(scene_index, record.as_str(), e.to_string())
                }
            };
            outcomes.push(outcome);
        }

        let summary = FetchSummary::from_outcomes(outcomes);
        tracing::info!(
            "All training data download completed: {} attempted, {} succeeded, {} failed",
            summary.attempted,
            summary.succeeded,
            summary.failed
        );

        tracing::info!("Downloaded files:");
        for line in list_tree(&target_dir) {
            tracing::info!("{}", line);
        }

        Ok(summary)
    }
}

/// Recursive listing of a directory tree, two-space indented per level.
pub fn list_tree(root: &Path) -> Vec<String> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| {
            let indent = "  ".repeat(entry.depth());
            let name = entry.file_name().to_string_lossy();
            if entry.file_type().is_dir() {
                format!("{}{}/", indent, name)
            } else {
                format!("{}{}", indent, name)
            }
        })
        .collect()
}
