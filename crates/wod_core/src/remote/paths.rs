//! Remote path templating.
//!
//! Pure string construction, no I/O. The produced URIs must match the
//! public bucket layout byte for byte.

use crate::models::DataCategory;

/// URI of a scene's primary tfrecord shard.
pub fn tfrecord_uri(bucket: &str, split: &str, record: &str) -> String {
    format!("{}/individual_files/{}/{}.tfrecord", bucket, split, record)
}

/// URI of one companion parquet table for a scene.
pub fn parquet_uri(bucket: &str, split: &str, category: DataCategory, segment_id: &str) -> String {
    format!(
        "{}/{}/{}/{}.parquet",
        bucket,
        split,
        category.name(),
        segment_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tfrecord_uri_matches_bucket_layout() {
        let uri = tfrecord_uri(
            "gs://waymo_open_dataset_v_1_4_1",
            "training",
            "segment-abc123_with_camera_labels",
        );
        assert_eq!(
            uri,
            "gs://waymo_open_dataset_v_1_4_1/individual_files/training/segment-abc123_with_camera_labels.tfrecord"
        );
    }

    #[test]
    fn parquet_uri_matches_bucket_layout() {
        let uri = parquet_uri(
            "gs://waymo_open_dataset_v_2_0_0",
            "training",
            DataCategory::LidarBox,
            "abc123",
        );
        assert_eq!(
            uri,
            "gs://waymo_open_dataset_v_2_0_0/training/lidar_box/abc123.parquet"
        );
    }
}
