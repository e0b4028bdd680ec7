//! Settings struct with TOML-based sections.
//!
//! Every environment-dependent constant lives here - the copy-tool
//! executable, bucket addresses, worker cap - so nothing is baked into
//! the fetch logic.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Local path settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Remote bucket addressing.
    #[serde(default)]
    pub remote: RemoteSettings,

    /// Download behavior.
    #[serde(default)]
    pub download: DownloadSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Local filesystem paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Directory downloaded files land in.
    #[serde(default = "default_target_dir")]
    pub target_dir: String,

    /// Scene list file; line position is the scene index.
    #[serde(default = "default_scene_list")]
    pub scene_list: String,
}

fn default_target_dir() -> String {
    "data/waymo/raw/training".to_string()
}

fn default_scene_list() -> String {
    "./waymo_train_list.txt".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            target_dir: default_target_dir(),
            scene_list: default_scene_list(),
        }
    }
}

/// Remote bucket addressing.
///
/// The defaults reproduce the public bucket layout exactly; changing them
/// only makes sense against a mirror with the same structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSettings {
    /// Bucket holding the per-scene tfrecord shards.
    #[serde(default = "default_tfrecord_bucket")]
    pub tfrecord_bucket: String,

    /// Bucket holding the per-category parquet tables.
    #[serde(default = "default_parquet_bucket")]
    pub parquet_bucket: String,

    /// Dataset split name used in both bucket layouts.
    #[serde(default = "default_split")]
    pub split: String,
}

fn default_tfrecord_bucket() -> String {
    "gs://waymo_open_dataset_v_1_4_1".to_string()
}

fn default_parquet_bucket() -> String {
    "gs://waymo_open_dataset_v_2_0_0".to_string()
}

fn default_split() -> String {
    "training".to_string()
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            tfrecord_bucket: default_tfrecord_bucket(),
            parquet_bucket: default_parquet_bucket(),
            split: default_split(),
        }
    }
}

/// Download behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadSettings {
    /// Copy tool executable; resolved through PATH unless absolute.
    #[serde(default = "default_gsutil")]
    pub gsutil: String,

    /// Number of scenes fetched concurrently.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
}

fn default_gsutil() -> String {
    "gsutil".to_string()
}

fn default_max_workers() -> usize {
    5
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            gsutil: default_gsutil(),
            max_workers: default_max_workers(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level for stderr output.
    #[serde(default)]
    pub level: LogLevel,
}
