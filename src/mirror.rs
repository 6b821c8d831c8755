//! # Mirror Pipeline Core
//!
//! This module implements the selective mirroring pass: expand the configured
//! glob patterns against the working copy, keep only regular files, remap each
//! match to its destination path, normalize its content, and write it out.
//!
//! ## Process
//!
//! 1.  **Pattern validation**: every pattern is checked up front; a pattern
//!     that could traverse above the working copy is a policy violation and
//!     nothing is written.
//!
//! 2.  **Expansion**: for each pattern, in order, the working copy is walked
//!     deterministically and relative paths are matched against the compiled
//!     glob. Directories, symlinked directories and other non-regular files
//!     are dropped silently.
//!
//! 3.  **Remapping**: the destination path is the matched path with the
//!     working-copy root stripped, joined under the destination root. Any
//!     path that would land outside the destination tree aborts the run.
//!
//! 4.  **Writing**: parent directories are created as needed, the content is
//!     normalized (or copied verbatim for configured auxiliary files) and the
//!     destination file is overwritten.
//!
//! Running the pass twice against the same working copy and a cleared
//! destination produces byte-identical results; normalization is a pure
//! function of the input bytes.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::normalize::normalize;

/// One matched upstream file and the destination it was written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorEntry {
    /// Full path of the matched file inside the working copy.
    pub source: PathBuf,
    /// Destination path, relative to the destination root.
    pub dest: PathBuf,
}

/// Recursively remove every owned destination subtree.
///
/// Missing paths are not an error; the delete is idempotent. These subtrees
/// are wholesale-owned by the pipeline and fully repopulated on every run.
pub fn clear_destination(roots: &[PathBuf]) -> Result<()> {
    for root in roots {
        match fs::remove_dir_all(root) {
            Ok(()) => log::debug!("cleared {}", root.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Mirror all pattern matches from the working copy into the destination root.
///
/// Patterns are processed in the given order and the returned entries follow
/// that order. Fails with [`Error::PathPolicy`] before writing anything if a
/// pattern could escape the destination tree.
pub fn mirror(
    working_copy: &Path,
    patterns: &[String],
    destination_root: &Path,
    verbatim: &[PathBuf],
) -> Result<Vec<MirrorEntry>> {
    for pattern in patterns {
        validate_pattern(pattern)?;
    }

    let mut entries = Vec::new();
    for pattern in patterns {
        let matched = expand_pattern(working_copy, pattern)?;
        if matched.is_empty() {
            log::warn!("pattern '{}' matched no files", pattern);
        }
        for rel in matched {
            let source = working_copy.join(&rel);
            write_entry(&source, &rel, destination_root, verbatim)?;
            log::info!("{}", rel.display());
            entries.push(MirrorEntry { source, dest: rel });
        }
    }

    Ok(entries)
}

/// Reject patterns that are absolute or traverse upward.
///
/// Matches are remapped by stripping the working-copy root, so a pattern that
/// reaches above the root would produce a destination outside the tree this
/// tool owns.
fn validate_pattern(pattern: &str) -> Result<()> {
    let path = Path::new(pattern);
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => {
                return Err(Error::PathPolicy {
                    path: pattern.to_string(),
                    message: "pattern must stay inside the working copy".to_string(),
                })
            }
        }
    }
    Ok(())
}

/// Expand one glob pattern against the working copy, returning the relative
/// paths of matched regular files in deterministic order.
fn expand_pattern(working_copy: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = Pattern::new(pattern)?;
    let options = MatchOptions {
        // '*' must not cross directory separators; '**' handles recursion
        require_literal_separator: true,
        ..MatchOptions::new()
    };

    let mut matched = Vec::new();
    let walker = WalkDir::new(working_copy)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git");

    for entry in walker {
        let entry = entry?;
        // Regular files only; symlinks to files are followed, symlinked
        // directories are neither descended into nor mirrored
        let file_type = entry.file_type();
        let is_regular = file_type.is_file()
            || (file_type.is_symlink() && fs::metadata(entry.path()).is_ok_and(|m| m.is_file()));
        if !is_regular {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(working_copy)
            .map_err(|_| Error::PathPolicy {
                path: entry.path().display().to_string(),
                message: "matched path is not under the working copy".to_string(),
            })?;

        if matcher.matches_path_with(rel, options) {
            matched.push(rel.to_path_buf());
        }
    }

    Ok(matched)
}

/// Write one matched file to its destination, normalizing unless the path is
/// configured verbatim.
fn write_entry(
    source: &Path,
    rel: &Path,
    destination_root: &Path,
    verbatim: &[PathBuf],
) -> Result<()> {
    // The walk only yields paths under the root, but a destination outside
    // the owned tree must never be written under any circumstances
    if rel
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(Error::PathPolicy {
            path: rel.display().to_string(),
            message: "destination escapes the destination tree".to_string(),
        });
    }

    let dest = destination_root.join(rel);
    if let Some(parent) = dest.parent() {
        // create_dir_all treats already-existing directories as success
        fs::create_dir_all(parent).map_err(|e| Error::Write {
            path: parent.display().to_string(),
            message: e.to_string(),
        })?;
    }

    let raw = fs::read(source)?;
    let content: Vec<u8> = if verbatim.iter().any(|v| v == rel) {
        raw
    } else {
        normalize(&raw).into_bytes()
    };

    fs::write(&dest, content).map_err(|e| Error::Write {
        path: dest.display().to_string(),
        message: e.to_string(),
    })
}
