//! waymo-fetch - downloads Waymo Open Dataset training shards.
//!
//! Resolves scene indices through the local scene list (or a split
//! file), then fetches each scene's tfrecord shard plus its companion
//! parquet tables with a bounded worker pool. Per-scene failures are
//! logged and summarized; only setup errors (missing list or split
//! file, bad index) fail the process.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;

use wod_core::config::{ConfigManager, Settings};
use wod_core::fetch::Orchestrator;
use wod_core::index;
use wod_core::logging::{self, LogLevel};

#[derive(Parser, Debug)]
#[command(
    name = "waymo-fetch",
    version,
    about = "Download Waymo Open Dataset training shards and companion tables"
)]
struct Args {
    /// Target directory for downloaded files
    #[arg(long = "target_dir")]
    target_dir: Option<PathBuf>,

    /// Scene indices to download
    #[arg(long = "scene_ids", num_args = 1..)]
    scene_ids: Vec<usize>,

    /// Split file whose first column lists scene indices (overrides --scene_ids)
    #[arg(long = "split_file")]
    split_file: Option<PathBuf>,

    /// Path to the scene list file
    #[arg(long = "waymo_train_list")]
    waymo_train_list: Option<PathBuf>,

    /// Optional TOML settings file (created with defaults if missing)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Concurrent download workers (overrides the configured cap)
    #[arg(long)]
    jobs: Option<usize>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long = "log_level")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(&args)?;
    apply_overrides(&mut settings, &args);

    let level = match &args.log_level {
        Some(value) => value
            .parse::<LogLevel>()
            .map_err(|e| anyhow!(e))
            .context("invalid --log_level")?,
        None => settings.logging.level,
    };
    logging::init_tracing(level);

    tracing::info!("Note: `gcloud auth login` is required before downloading");

    let scene_ids = match &args.split_file {
        Some(split) => index::resolve_from_split(split)?,
        None => args.scene_ids.clone(),
    };
    if scene_ids.is_empty() {
        bail!("either --scene_ids or --split_file must be provided");
    }

    let summary = Orchestrator::new(settings).run(&scene_ids).await?;

    // Machine-readable summary; per-scene failures never change the exit code
    println!("{}", serde_json::to_string(&summary)?);

    Ok(())
}

/// Load settings from the config file if one was given, defaults otherwise.
fn load_settings(args: &Args) -> Result<Settings> {
    match &args.config {
        Some(path) => {
            let mut manager = ConfigManager::new(path);
            manager
                .load_or_create()
                .with_context(|| format!("failed to load config {}", path.display()))?;
            Ok(manager.settings().clone())
        }
        None => Ok(Settings::default()),
    }
}

/// Fold command line overrides into the settings.
fn apply_overrides(settings: &mut Settings, args: &Args) {
    if let Some(target_dir) = &args.target_dir {
        settings.paths.target_dir = target_dir.display().to_string();
    }
    if let Some(list) = &args.waymo_train_list {
        settings.paths.scene_list = list.display().to_string();
    }
    if let Some(jobs) = args.jobs {
        settings.download.max_workers = jobs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn overrides_replace_configured_values() {
        let args = Args::parse_from([
            "waymo-fetch",
            "--scene_ids",
            "0",
            "--target_dir",
            "/tmp/shards",
            "--jobs",
            "3",
        ]);

        let mut settings = Settings::default();
        apply_overrides(&mut settings, &args);

        assert_eq!(settings.paths.target_dir, "/tmp/shards");
        assert_eq!(settings.download.max_workers, 3);
        // Untouched values keep their defaults
        assert_eq!(settings.paths.scene_list, "./waymo_train_list.txt");
    }

    #[test]
    fn scene_ids_accept_multiple_values() {
        let args = Args::parse_from(["waymo-fetch", "--scene_ids", "3", "17", "42"]);
        assert_eq!(args.scene_ids, vec![3, 17, 42]);
    }
}
