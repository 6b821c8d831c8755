//! Mirror configuration and the fixed ETL defaults.
//!
//! Everything the pipeline touches on disk is carried here as an explicit
//! value rather than an ambient path, so the same code runs against the real
//! repository layout and against throwaway temporary trees in tests.

use std::path::PathBuf;

use crate::release::ReleaseTag;

/// Configuration for one mirror run.
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// Upstream repository slug, e.g. `ETLCPP/etl`.
    pub repo_slug: String,
    /// Clone URL for the upstream repository.
    pub clone_url: String,
    /// Release metadata endpoint queried for the latest tag.
    pub release_url: String,
    /// Transient working-copy directory, fully owned by the pipeline.
    pub working_copy: PathBuf,
    /// Ordered glob patterns, rooted at the working copy. Order only affects
    /// output ordering; patterns must not overlap ambiguously.
    pub patterns: Vec<String>,
    /// Base directory the stripped relative paths are written under.
    pub destination_root: PathBuf,
    /// Subtrees under the destination root that this tool owns wholesale;
    /// cleared before every run.
    pub owned_roots: Vec<PathBuf>,
    /// Relative paths copied byte-for-byte with no normalization.
    pub verbatim: Vec<PathBuf>,
    /// Commit message template; `{tag}` is replaced with the resolved tag.
    pub commit_template: String,
}

impl MirrorConfig {
    /// The fixed configuration for mirroring ETLCPP/etl into this repository.
    pub fn etl() -> Self {
        Self {
            repo_slug: "ETLCPP/etl".to_string(),
            clone_url: "https://github.com/ETLCPP/etl.git".to_string(),
            release_url: "https://api.github.com/repos/ETLCPP/etl/releases/latest".to_string(),
            working_copy: PathBuf::from("etl_src"),
            patterns: vec![
                "LICENSE".to_string(),
                "include/etl/**/*.h".to_string(),
            ],
            destination_root: PathBuf::from("."),
            owned_roots: vec![PathBuf::from("include")],
            verbatim: vec![PathBuf::from("LICENSE")],
            commit_template: "Update ETL to {tag}".to_string(),
        }
    }

    /// Render the commit message for a resolved release tag.
    pub fn commit_message(&self, tag: &ReleaseTag) -> String {
        self.commit_template.replace("{tag}", tag.as_str())
    }

    /// Paths handed to the version-control collaborator for staging: the
    /// owned subtrees plus the verbatim auxiliary files.
    pub fn stage_paths(&self) -> Vec<PathBuf> {
        let mut paths = self.owned_roots.clone();
        paths.extend(self.verbatim.iter().cloned());
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etl_defaults() {
        let config = MirrorConfig::etl();
        assert_eq!(config.repo_slug, "ETLCPP/etl");
        assert_eq!(config.patterns, vec!["LICENSE", "include/etl/**/*.h"]);
        assert_eq!(config.owned_roots, vec![PathBuf::from("include")]);
        assert_eq!(config.verbatim, vec![PathBuf::from("LICENSE")]);
        assert_eq!(config.working_copy, PathBuf::from("etl_src"));
    }

    #[test]
    fn test_commit_message_embeds_tag() {
        let config = MirrorConfig::etl();
        let message = config.commit_message(&ReleaseTag::new("v20.39.4"));
        assert_eq!(message, "Update ETL to v20.39.4");
    }

    #[test]
    fn test_stage_paths_cover_owned_roots_and_verbatim_files() {
        let config = MirrorConfig::etl();
        let staged = config.stage_paths();
        assert!(staged.contains(&PathBuf::from("include")));
        assert!(staged.contains(&PathBuf::from("LICENSE")));
        assert_eq!(staged.len(), 2);
    }
}
