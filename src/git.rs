//! # Git Collaborators
//!
//! The mirror pipeline shells out to the system `git` for exactly two
//! concerns: materializing the upstream snapshot and committing the mirrored
//! result. Both are defined as traits so the pipeline core stays unit-testable
//! with fakes, without any network or git binary present.
//!
//! Using the system git command means SSH keys, credential helpers and
//! anything else configured in `~/.gitconfig` work without extra handling.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};
use crate::release::ReleaseTag;

/// Capability to materialize a single-revision snapshot of an upstream
/// repository at a named tag.
pub trait SnapshotFetcher {
    /// Materialize the snapshot into `target_dir`, replacing whatever was
    /// there before.
    fn fetch(&self, url: &str, tag: &ReleaseTag, target_dir: &Path) -> Result<()>;
}

/// Capability to stage paths and commit them when anything changed.
///
/// The pipeline does not diff anything itself; it trusts this collaborator's
/// own change detection.
pub trait VersionControl {
    /// Mark the given paths as pending inclusion in the next commit.
    fn stage(&self, paths: &[PathBuf]) -> Result<()>;

    /// Create a commit only if staged content differs from the last recorded
    /// snapshot. Returns whether a commit was made.
    fn commit_if_changed(&self, message: &str) -> Result<bool>;
}

/// Production [`SnapshotFetcher`]: shallow, single-branch `git clone` pinned
/// to the release tag.
pub struct GitClone;

impl SnapshotFetcher for GitClone {
    fn fetch(&self, url: &str, tag: &ReleaseTag, target_dir: &Path) -> Result<()> {
        // git refuses to clone into an existing non-empty directory
        if target_dir.exists() {
            fs::remove_dir_all(target_dir)?;
        }
        if let Some(parent) = target_dir.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let output = Command::new("git")
            .args(["clone", "--depth=1", "--branch", tag.as_str(), url])
            .arg(target_dir)
            .output()
            .map_err(|e| Error::Fetch {
                url: url.to_string(),
                tag: tag.to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Fetch {
                url: url.to_string(),
                tag: tag.to_string(),
                message: stderr.to_string(),
            });
        }

        Ok(())
    }
}

/// Production [`VersionControl`]: the staging index of the repository at
/// `root`.
pub struct GitIndex {
    root: PathBuf,
}

impl GitIndex {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn git(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.root);
        cmd
    }
}

impl VersionControl for GitIndex {
    fn stage(&self, paths: &[PathBuf]) -> Result<()> {
        let output = self
            .git()
            .arg("add")
            .args(paths)
            .output()
            .map_err(|e| Error::Commit {
                command: "git add".to_string(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(Error::Commit {
                command: "git add".to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(())
    }

    fn commit_if_changed(&self, message: &str) -> Result<bool> {
        // diff-index exits non-zero exactly when the staged tree differs
        // from HEAD
        let status = self
            .git()
            .args(["diff-index", "--quiet", "HEAD", "--"])
            .status()
            .map_err(|e| Error::Commit {
                command: "git diff-index".to_string(),
                stderr: e.to_string(),
            })?;

        if status.success() {
            log::info!("no staged changes, skipping commit");
            return Ok(false);
        }

        let output = self
            .git()
            .args(["commit", "-m", message])
            .output()
            .map_err(|e| Error::Commit {
                command: "git commit".to_string(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(Error::Commit {
                command: "git commit".to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo(dir: &Path) {
        let run = |args: &[&str]| {
            let status = Command::new("git")
                .args(args)
                .current_dir(dir)
                .status()
                .unwrap();
            assert!(status.success(), "git {:?} failed", args);
        };
        run(&["init", "--quiet"]);
        run(&["config", "user.email", "test@example.com"]);
        run(&["config", "user.name", "Test"]);
        // diff-index needs a HEAD to compare against
        fs::write(dir.join(".gitkeep"), "").unwrap();
        run(&["add", ".gitkeep"]);
        run(&["commit", "--quiet", "-m", "initial"]);
    }

    #[test]
    fn test_commit_if_changed_commits_new_content() {
        let temp_dir = TempDir::new().unwrap();
        init_repo(temp_dir.path());

        fs::write(temp_dir.path().join("mirrored.h"), "int x;\n").unwrap();

        let vcs = GitIndex::new(temp_dir.path());
        vcs.stage(&[PathBuf::from("mirrored.h")]).unwrap();

        let committed = vcs.commit_if_changed("Update ETL to v1.0.0").unwrap();
        assert!(committed);
    }

    #[test]
    fn test_commit_if_changed_is_false_without_changes() {
        let temp_dir = TempDir::new().unwrap();
        init_repo(temp_dir.path());

        let vcs = GitIndex::new(temp_dir.path());
        vcs.stage(&[PathBuf::from(".gitkeep")]).unwrap();

        let committed = vcs.commit_if_changed("Update ETL to v1.0.0").unwrap();
        assert!(!committed);
    }

    #[test]
    fn test_stage_missing_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        init_repo(temp_dir.path());

        let vcs = GitIndex::new(temp_dir.path());
        let err = vcs.stage(&[PathBuf::from("does-not-exist")]).unwrap_err();
        assert!(matches!(err, Error::Commit { .. }));
    }

    // Note: integration tests for GitClone would require network access and
    // a real upstream repository, so they're omitted here
}
