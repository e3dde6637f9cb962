//! Error types for repository scanning.
//!
//! These cover failures that abort an operation before or outside the
//! per-commit fan-out: opening the repository, building the revision walk,
//! resolving a blob id, and cloning. Failures inside a worker are fatal for
//! that commit only and never surface here; the scan continues and returns a
//! partial result instead of a hard stop.
//!
//! The enum is `#[non_exhaustive]`; consumers should include a fallback
//! match arm.

use std::fmt;
use std::path::PathBuf;

/// Errors from opening, walking, cloning, or reading a repository.
#[derive(Debug)]
#[non_exhaustive]
pub enum ScanError {
    /// The path is not an openable git repository.
    RepositoryOpen {
        /// Path that was handed to the open call.
        path: PathBuf,
        /// Underlying libgit2 diagnostic.
        source: git2::Error,
    },
    /// The revision walk could not be constructed or seeded.
    Walk {
        /// Underlying libgit2 diagnostic.
        source: git2::Error,
    },
    /// The supplied blob identifier is not a valid hex object id.
    InvalidOid {
        /// The identifier, verbatim.
        oid: String,
        /// Underlying libgit2 diagnostic.
        source: git2::Error,
    },
    /// The object id did not resolve to a blob in the object store.
    BlobNotFound {
        /// The identifier, verbatim.
        oid: String,
        /// Underlying libgit2 diagnostic.
        source: git2::Error,
    },
    /// A remote repository could not be cloned.
    Clone {
        /// Remote URL handed to the clone call.
        url: String,
        /// Underlying libgit2 diagnostic.
        source: git2::Error,
    },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RepositoryOpen { path, source } => {
                write!(f, "could not open repository {}: {source}", path.display())
            }
            Self::Walk { source } => write!(f, "revision walk failed: {source}"),
            Self::InvalidOid { oid, source } => {
                write!(f, "invalid object id \"{oid}\": {source}")
            }
            Self::BlobNotFound { oid, source } => {
                write!(f, "blob {oid} not found: {source}")
            }
            Self::Clone { url, source } => {
                write!(f, "could not clone {url}: {source}")
            }
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RepositoryOpen { source, .. }
            | Self::Walk { source }
            | Self::InvalidOid { source, .. }
            | Self::BlobNotFound { source, .. }
            | Self::Clone { source, .. } => Some(source),
        }
    }
}
