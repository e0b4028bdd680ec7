//! Low-level copy-tool wrapper.
//!
//! One invocation per blob: `<program> -m cp <uri> <dest>/`. The tool is
//! a black box; the only signals consumed are its exit status and stderr.

use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::fetch::{FetchError, FetchResult};

/// Handle to the external copy tool.
///
/// The program path is injected from settings, so tests can point it at a
/// stub script and deployments at a non-PATH install.
#[derive(Debug, Clone)]
pub struct Gsutil {
    program: PathBuf,
}

impl Gsutil {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Short name of the tool, for diagnostics.
    fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Copy one remote blob into a local directory.
    pub async fn copy(&self, uri: &str, dest_dir: &Path) -> FetchResult<()> {
        // Trailing separator makes the destination a directory target
        let dest = format!("{}/", dest_dir.display());

        tracing::debug!(
            "Running: {} -m cp \"{}\" {}",
            self.program.display(),
            uri,
            dest
        );

        let output = Command::new(&self.program)
            .arg("-m")
            .arg("cp")
            .arg(uri)
            .arg(&dest)
            .output()
            .await
            .map_err(|source| FetchError::spawn_failed(self.tool_name(), source))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FetchError::command_failed(
                self.tool_name(),
                output.status.code().unwrap_or(-1),
                stderr.trim(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    fn write_stub(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("gsutil");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[tokio::test]
    async fn copy_succeeds_on_zero_exit() {
        let dir = tempdir().unwrap();
        let tool = write_stub(dir.path(), "exit 0");

        let gsutil = Gsutil::new(&tool);
        gsutil
            .copy("gs://bucket/file", dir.path())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn copy_captures_exit_code_and_stderr() {
        let dir = tempdir().unwrap();
        let tool = write_stub(dir.path(), "echo 'AccessDenied' >&2; exit 3");

        let gsutil = Gsutil::new(&tool);
        let err = gsutil
            .copy("gs://bucket/file", dir.path())
            .await
            .unwrap_err();

        match err {
            FetchError::CommandFailed {
                tool,
                exit_code,
                message,
            } => {
                assert_eq!(tool, "gsutil");
                assert_eq!(exit_code, 3);
                assert!(message.contains("AccessDenied"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn copy_reports_missing_tool() {
        let dir = tempdir().unwrap();

        let gsutil = Gsutil::new(dir.path().join("no_such_tool"));
        let err = gsutil
            .copy("gs://bucket/file", dir.path())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::SpawnFailed { .. }));
    }
}
