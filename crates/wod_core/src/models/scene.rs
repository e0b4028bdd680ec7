//! Scene structures: records from the scene list, per-scene fetch plans,
//! and the fixed table of companion-data categories.

use std::fmt;
use std::path::PathBuf;

/// One line of the scene list file.
///
/// The record is an opaque token; its line position in the list file is
/// the scene index. The only content guarantee is "non-empty string".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRecord(String);

impl SceneRecord {
    pub fn new(record: impl Into<String>) -> Self {
        Self(record.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the segment id from a scene record.
///
/// Records normally look like `segment-<id>_with_camera_labels`; the id is
/// the substring between those two fixed markers. Returns `None` for any
/// other shape.
pub fn derive_segment_id(record: &str) -> Option<&str> {
    record
        .strip_prefix("segment-")?
        .strip_suffix("_with_camera_labels")
}

/// Everything needed to fetch one scene.
#[derive(Debug, Clone)]
pub struct ScenePlan {
    /// Zero-based position in the scene list file.
    pub scene_index: usize,
    /// The scene's record from the list file.
    pub record: SceneRecord,
    /// Id used to address the scene's companion parquet files.
    pub segment_id: String,
    /// Directory the scene's files land in.
    pub target_root: PathBuf,
}

impl ScenePlan {
    /// Build a plan, deriving the segment id from the record.
    ///
    /// A record that does not match the expected shape falls back to the
    /// decimal scene index as the segment id. That fallback is lossy on
    /// purpose and is announced with a warning.
    pub fn new(scene_index: usize, record: SceneRecord, target_root: PathBuf) -> Self {
        let segment_id = match derive_segment_id(record.as_str()) {
            Some(id) => id.to_string(),
            None => {
                tracing::warn!("Unexpected scene record format: {}", record);
                scene_index.to_string()
            }
        };

        Self {
            scene_index,
            record,
            segment_id,
            target_root,
        }
    }
}

/// The seven companion-data categories attached to every scene.
///
/// Each category maps to one subdirectory under the target root. Category
/// name (remote path component) and folder name (local directory) are kept
/// as separate lookups even though they currently coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataCategory {
    Lidar,
    LidarBox,
    LidarCalibration,
    LidarCameraProjection,
    LidarCameraSyncedBox,
    LidarPose,
    VehiclePose,
}

impl DataCategory {
    /// All categories, in fetch order.
    pub const ALL: [DataCategory; 7] = [
        DataCategory::Lidar,
        DataCategory::LidarBox,
        DataCategory::LidarCalibration,
        DataCategory::LidarCameraProjection,
        DataCategory::LidarCameraSyncedBox,
        DataCategory::LidarPose,
        DataCategory::VehiclePose,
    ];

    /// Remote path component for this category.
    pub fn name(&self) -> &'static str {
        match self {
            DataCategory::Lidar => "lidar",
            DataCategory::LidarBox => "lidar_box",
            DataCategory::LidarCalibration => "lidar_calibration",
            DataCategory::LidarCameraProjection => "lidar_camera_projection",
            DataCategory::LidarCameraSyncedBox => "lidar_camera_synced_box",
            DataCategory::LidarPose => "lidar_pose",
            DataCategory::VehiclePose => "vehicle_pose",
        }
    }

    /// Local subdirectory name for this category.
    pub fn folder(&self) -> &'static str {
        match self {
            DataCategory::Lidar => "lidar",
            DataCategory::LidarBox => "lidar_box",
            DataCategory::LidarCalibration => "lidar_calibration",
            DataCategory::LidarCameraProjection => "lidar_camera_projection",
            DataCategory::LidarCameraSyncedBox => "lidar_camera_synced_box",
            DataCategory::LidarPose => "lidar_pose",
            DataCategory::VehiclePose => "vehicle_pose",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_id_from_well_formed_record() {
        assert_eq!(
            derive_segment_id("segment-abc123_with_camera_labels"),
            Some("abc123")
        );
    }

    #[test]
    fn segment_id_rejects_other_shapes() {
        assert_eq!(derive_segment_id("weird_name"), None);
        assert_eq!(derive_segment_id("segment-abc123"), None);
        assert_eq!(derive_segment_id("abc123_with_camera_labels"), None);
    }

    #[test]
    fn plan_uses_derived_segment_id() {
        let plan = ScenePlan::new(
            3,
            SceneRecord::new("segment-abc123_with_camera_labels"),
            PathBuf::from("/tmp/out"),
        );
        assert_eq!(plan.segment_id, "abc123");
    }

    #[test]
    fn plan_falls_back_to_scene_index() {
        crate::logging::init_test_tracing();

        let plan = ScenePlan::new(7, SceneRecord::new("weird_name"), PathBuf::from("/tmp/out"));
        assert_eq!(plan.segment_id, "7");
    }

    #[test]
    fn category_table_is_complete_and_distinct() {
        let folders: Vec<&str> = DataCategory::ALL.iter().map(|c| c.folder()).collect();
        assert_eq!(folders.len(), 7);

        let mut deduped = folders.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), 7);
    }
}
