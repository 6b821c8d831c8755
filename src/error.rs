//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `etl-vendor` tool. It uses the `thiserror` library to create a single
//! `Error` enum that covers every anticipated failure mode, providing clear
//! and descriptive error messages.
//!
//! The variants map one-to-one onto the stages of a mirror run:
//!
//! - **`Resolution`**: the latest upstream release could not be determined,
//!   either because the metadata endpoint was unreachable or because its
//!   payload carried no recognizable tag field.
//! - **`Fetch`**: the working copy could not be materialized at the resolved
//!   tag (or, with `--fast`, no prior working copy existed to reuse).
//! - **`PathPolicy`**: a source pattern or matched path would resolve outside
//!   the destination tree.
//! - **`Write`**: a destination file or its parent directories could not be
//!   written.
//! - **`Commit`**: the staging or commit process failed.
//!
//! Plus `#[from]` wrappers for the underlying `glob`, `walkdir` and I/O
//! errors. Every error aborts the run; the only locally recovered condition
//! is a malformed byte sequence in a single source file, which is handled
//! inside the normalizer and never surfaces here.

use thiserror::Error;

/// Main error type for etl-vendor operations
#[derive(Error, Debug)]
pub enum Error {
    /// The latest upstream release could not be resolved.
    #[error("Release resolution error for {url}: {message}")]
    Resolution { url: String, message: String },

    /// The upstream working copy could not be materialized.
    #[error("Fetch error for {url}@{tag}: {message}")]
    Fetch {
        url: String,
        tag: String,
        message: String,
    },

    /// A pattern or matched path would escape the destination tree.
    #[error("Path policy violation for '{path}': {message}")]
    PathPolicy { path: String, message: String },

    /// A destination file could not be written.
    #[error("Write error for '{path}': {message}")]
    Write { path: String, message: String },

    /// Staging or committing the mirrored result failed.
    #[error("Commit error: {command} - {stderr}")]
    Commit { command: String, stderr: String },

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// A directory traversal error, wrapped from `walkdir::Error`.
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
