//! Maps scene indices to records from the scene list file, and parses
//! split files into scene indices.
//!
//! Everything here is fatal on failure: a missing file or an index past
//! the end of the list ends the run before any download starts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::SceneRecord;

/// Errors from scene index resolution.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Scene list not found: {0}")]
    ListNotFound(PathBuf),

    #[error("Split file not found: {0}")]
    SplitNotFound(PathBuf),

    #[error("Scene index {index} out of range for list of {len} scenes")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid scene index {value:?} in split file row {row}")]
    BadSplitRow { row: usize, value: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse split file: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for resolver operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Look up scene records by position in the scene list file.
///
/// Records come back in request order. An index past the end of the list
/// is an error, never a skip.
pub fn resolve(scene_indices: &[usize], list_path: &Path) -> ResolveResult<Vec<SceneRecord>> {
    if !list_path.exists() {
        return Err(ResolveError::ListNotFound(list_path.to_path_buf()));
    }

    let content = fs::read_to_string(list_path).map_err(|source| ResolveError::Io {
        path: list_path.to_path_buf(),
        source,
    })?;

    let lines: Vec<&str> = content.lines().map(|line| line.trim_end()).collect();

    scene_indices
        .iter()
        .map(|&index| match lines.get(index) {
            Some(line) => Ok(SceneRecord::new(*line)),
            None => Err(ResolveError::IndexOutOfRange {
                index,
                len: lines.len(),
            }),
        })
        .collect()
}

/// Parse scene indices from a split file.
///
/// The file is CSV with a header row. Only the first field of each data
/// row is read; everything after the first comma is ignored.
pub fn resolve_from_split(split_path: &Path) -> ResolveResult<Vec<usize>> {
    if !split_path.exists() {
        return Err(ResolveError::SplitNotFound(split_path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(split_path)?;

    let mut indices = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let field = record.get(0).unwrap_or("").trim();
        let index = field.parse::<usize>().map_err(|_| ResolveError::BadSplitRow {
            // +2: one for the header, one for one-based numbering
            row: row + 2,
            value: field.to_string(),
        })?;
        indices.push(index);
    }

    Ok(indices)
}
