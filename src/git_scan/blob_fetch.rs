//! Standalone blob retrieval by object id.
//!
//! This is a self-contained operation: it opens the repository, resolves the
//! hex id, copies the blob bytes out, and releases everything before
//! returning. It does not consult the rule store and can be called without a
//! scan in flight.

use std::path::Path;

use git2::{Oid, Repository};

use super::errors::ScanError;

/// Reads the raw bytes of the blob identified by `file_oid`.
///
/// Fails with [`ScanError::RepositoryOpen`] when the path is not a
/// repository, [`ScanError::InvalidOid`] when `file_oid` is not valid hex,
/// and [`ScanError::BlobNotFound`] when the id does not resolve to a blob.
pub fn read_blob(repository_path: &Path, file_oid: &str) -> Result<Vec<u8>, ScanError> {
    let repo = Repository::open(repository_path).map_err(|source| ScanError::RepositoryOpen {
        path: repository_path.to_path_buf(),
        source,
    })?;

    let oid = Oid::from_str(file_oid).map_err(|source| ScanError::InvalidOid {
        oid: file_oid.to_string(),
        source,
    })?;

    let blob = repo.find_blob(oid).map_err(|source| ScanError::BlobNotFound {
        oid: file_oid.to_string(),
        source,
    })?;

    Ok(blob.content().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_repository_is_reported() {
        let err = read_blob(Path::new("/no/such/repository"), &"0".repeat(40)).unwrap_err();
        assert!(matches!(err, ScanError::RepositoryOpen { .. }));
    }

    #[test]
    fn malformed_oid_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();

        let err = read_blob(dir.path(), "not-hex").unwrap_err();
        assert!(matches!(err, ScanError::InvalidOid { .. }));
    }

    #[test]
    fn unknown_blob_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();

        let err = read_blob(dir.path(), &"a".repeat(40)).unwrap_err();
        assert!(matches!(err, ScanError::BlobNotFound { .. }));
    }

    #[test]
    fn round_trips_blob_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let content: &[u8] = b"password = \"hunter2abc\"\n";
        let oid = repo.blob(content).unwrap();

        let bytes = read_blob(dir.path(), &oid.to_string()).unwrap();
        assert_eq!(bytes, content);
    }
}
