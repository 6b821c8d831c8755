//! # Pipeline Orchestration
//!
//! Runs the full mirror sequence: resolve the latest upstream release,
//! prepare the working copy, clear the owned destination subtrees, mirror the
//! pattern matches, then hand off to the version-control collaborator.
//!
//! Everything is strictly sequential. Any stage error aborts the whole run;
//! re-invoking the pipeline is always safe because destination repopulation
//! and working-copy refresh are both idempotent. Staging and committing come
//! last, so a failed run never produces a partial commit.

use crate::config::MirrorConfig;
use crate::error::{Error, Result};
use crate::git::{SnapshotFetcher, VersionControl};
use crate::mirror::{self, MirrorEntry};
use crate::release::{self, ReleaseTag};

/// Outcome of one successful mirror run.
#[derive(Debug)]
pub struct RunReport {
    /// The upstream release that was mirrored.
    pub tag: ReleaseTag,
    /// Every file written, in pattern order.
    pub entries: Vec<MirrorEntry>,
    /// Whether the collaborator recorded a commit.
    pub committed: bool,
}

/// Execute one full mirror run.
///
/// With `skip_refresh`, the existing working copy is reused instead of being
/// re-fetched; it is a fetch error if none exists.
pub fn run(
    config: &MirrorConfig,
    fetcher: &dyn SnapshotFetcher,
    vcs: &dyn VersionControl,
    skip_refresh: bool,
) -> Result<RunReport> {
    let tag = release::resolve_latest(&config.release_url)?;
    run_at(config, fetcher, vcs, &tag, skip_refresh)
}

/// Execute a mirror run against an already-resolved release tag.
pub fn run_at(
    config: &MirrorConfig,
    fetcher: &dyn SnapshotFetcher,
    vcs: &dyn VersionControl,
    tag: &ReleaseTag,
    skip_refresh: bool,
) -> Result<RunReport> {
    prepare_working_copy(config, fetcher, tag, skip_refresh)?;

    let owned: Vec<_> = config
        .owned_roots
        .iter()
        .map(|root| config.destination_root.join(root))
        .collect();
    mirror::clear_destination(&owned)?;

    log::info!("copying {} sources", config.repo_slug);
    let entries = mirror::mirror(
        &config.working_copy,
        &config.patterns,
        &config.destination_root,
        &config.verbatim,
    )?;

    vcs.stage(&config.stage_paths())?;
    let committed = vcs.commit_if_changed(&config.commit_message(tag))?;

    Ok(RunReport {
        tag: tag.clone(),
        entries,
        committed,
    })
}

fn prepare_working_copy(
    config: &MirrorConfig,
    fetcher: &dyn SnapshotFetcher,
    tag: &ReleaseTag,
    skip_refresh: bool,
) -> Result<()> {
    if skip_refresh {
        if !config.working_copy.is_dir() {
            return Err(Error::Fetch {
                url: config.clone_url.clone(),
                tag: tag.to_string(),
                message: "no existing working copy to reuse".to_string(),
            });
        }
        log::info!(
            "reusing existing working copy at {}",
            config.working_copy.display()
        );
        return Ok(());
    }

    log::info!("cloning {} at tag {}", config.repo_slug, tag);
    fetcher.fetch(&config.clone_url, tag, &config.working_copy)
}
