//! # etl-vendor Library
//!
//! Core functionality for mirroring a subset of the ETL C++ template library
//! into this repository. The `etl-vendor` binary is a thin wrapper around
//! these modules.
//!
//! ## Core Concepts
//!
//! - **Release resolution (`release`)**: queries the upstream release
//!   metadata endpoint for the latest published tag. Stateless, never cached.
//! - **Configuration (`config`)**: the `MirrorConfig` value carrying the
//!   upstream identity, source patterns, and owned destination subtrees as
//!   explicit parameters.
//! - **Mirroring (`mirror`, `normalize`)**: glob expansion against the
//!   working copy, path-policy enforcement, and the deterministic text
//!   normalization applied to every mirrored file.
//! - **Git collaborators (`git`)**: the `SnapshotFetcher` and
//!   `VersionControl` trait seams, with production implementations that shell
//!   out to the system git; tests inject fakes.
//! - **Orchestration (`pipeline`)**: the strictly sequential run — resolve,
//!   prepare working copy, clear destination, mirror, stage, commit.
//!
//! ## Execution Flow
//!
//! 1.  **Resolve**: obtain the latest upstream release tag.
//! 2.  **Prepare**: shallow-clone the upstream at that tag (or reuse the
//!     existing working copy with `--fast`).
//! 3.  **Clear**: delete the wholly-owned destination subtrees.
//! 4.  **Mirror**: expand each pattern in order, normalize, and write.
//! 5.  **Commit**: stage the destination tree and commit only if anything
//!     changed.

pub mod config;
pub mod error;
pub mod git;
pub mod mirror;
pub mod normalize;
pub mod pipeline;
pub mod release;
