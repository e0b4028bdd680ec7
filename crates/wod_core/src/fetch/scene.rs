//! Single-scene fetcher.
//!
//! One scene means eight copy-tool invocations: the primary tfrecord
//! shard into the target root, then one parquet table per data category
//! into that category's subdirectory. Any failure aborts the rest of the
//! scene; siblings are unaffected.

use std::fs;

use crate::config::{RemoteSettings, Settings};
use crate::models::{DataCategory, ScenePlan};
use crate::remote::{paths, Gsutil};

use super::errors::{FetchError, FetchResult};

/// Fetches all files belonging to one scene.
pub struct SceneFetcher {
    gsutil: Gsutil,
    remote: RemoteSettings,
}

impl SceneFetcher {
    /// Create a fetcher from settings.
    pub fn new(settings: &Settings) -> Self {
        Self {
            gsutil: Gsutil::new(&settings.download.gsutil),
            remote: settings.remote.clone(),
        }
    }

    /// Fetch the primary shard and all companion tables for one scene.
    pub async fn fetch_scene(&self, plan: &ScenePlan) -> FetchResult<()> {
        tracing::info!("=== Processing scene {} ===", plan.scene_index);

        let shard_uri = paths::tfrecord_uri(
            &self.remote.tfrecord_bucket,
            &self.remote.split,
            plan.record.as_str(),
        );
        tracing::info!("Downloading {}.tfrecord", plan.record);
        self.gsutil.copy(&shard_uri, &plan.target_root).await?;

        for category in DataCategory::ALL {
            let category_dir = plan.target_root.join(category.folder());
            fs::create_dir_all(&category_dir).map_err(|source| {
                FetchError::io_error(format!("create {}", category_dir.display()), source)
            })?;

            let table_uri = paths::parquet_uri(
                &self.remote.parquet_bucket,
                &self.remote.split,
                category,
                &plan.segment_id,
            );
            tracing::info!("Downloading {} data to {}/", category.name(), category.folder());
            self.gsutil.copy(&table_uri, &category_dir).await?;
        }

        tracing::info!("Scene {} completed", plan.scene_index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SceneRecord;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    /// Stub copy tool: creates an empty file named after the URI basename
    /// in the destination directory, like `cp` would.
    const COPY_STUB: &str = r#"touch "$4$(basename "$3")""#;

    fn write_stub(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("gsutil");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn fetcher_with_stub(stub: &Path) -> SceneFetcher {
        let mut settings = Settings::default();
        settings.download.gsutil = stub.display().to_string();
        SceneFetcher::new(&settings)
    }

    #[tokio::test]
    async fn fetched_scene_produces_full_layout() {
        let dir = tempdir().unwrap();
        let stub = write_stub(dir.path(), COPY_STUB);
        let target = dir.path().join("out");
        fs::create_dir_all(&target).unwrap();

        let plan = ScenePlan::new(
            0,
            SceneRecord::new("segment-abc123_with_camera_labels"),
            target.clone(),
        );
        fetcher_with_stub(&stub).fetch_scene(&plan).await.unwrap();

        assert!(target
            .join("segment-abc123_with_camera_labels.tfrecord")
            .exists());

        for category in DataCategory::ALL {
            let file = target.join(category.folder()).join("abc123.parquet");
            assert!(file.exists(), "missing {}", file.display());
        }
    }

    #[tokio::test]
    async fn category_failure_aborts_remaining_categories() {
        let dir = tempdir().unwrap();
        // Fail on the lidar_box table, succeed on everything else
        let stub = write_stub(
            dir.path(),
            r#"case "$3" in
  */lidar_box/*) echo "boom" >&2; exit 1;;
  *) touch "$4$(basename "$3")";;
esac"#,
        );
        let target = dir.path().join("out");
        fs::create_dir_all(&target).unwrap();

        let plan = ScenePlan::new(
            0,
            SceneRecord::new("segment-abc123_with_camera_labels"),
            target.clone(),
        );
        let err = fetcher_with_stub(&stub)
            .fetch_scene(&plan)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::CommandFailed { exit_code: 1, .. }));

        // lidar came before the failure, vehicle_pose after
        assert!(target.join("lidar").join("abc123.parquet").exists());
        assert!(!target.join("vehicle_pose").exists());
    }

    #[tokio::test]
    async fn primary_shard_failure_aborts_whole_scene() {
        let dir = tempdir().unwrap();
        let stub = write_stub(
            dir.path(),
            r#"case "$3" in
  *.tfrecord) echo "no such object" >&2; exit 1;;
  *) touch "$4$(basename "$3")";;
esac"#,
        );
        let target = dir.path().join("out");
        fs::create_dir_all(&target).unwrap();

        let plan = ScenePlan::new(
            0,
            SceneRecord::new("segment-abc123_with_camera_labels"),
            target.clone(),
        );
        let err = fetcher_with_stub(&stub)
            .fetch_scene(&plan)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::CommandFailed { .. }));

        // No category directory was even created
        assert!(!target.join("lidar").exists());
    }
}
