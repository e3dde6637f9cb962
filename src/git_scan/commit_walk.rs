//! Commit enumeration for a scan.
//!
//! Walks history from a glob-selected start set, newest committer time
//! first, and materializes the commit-id list in memory before dispatch.
//! The literal glob `HEAD` is the degenerate start set: the walk begins at
//! `HEAD` alone instead of expanding references.
//!
//! Merge commits are *not* excluded here; the per-commit scan skips them so
//! the parent-count decision sits next to the diff it governs.

use git2::{Oid, Repository, Sort};

use super::errors::ScanError;

/// Enumerates the commit ids reachable from `branch_glob`.
///
/// Sorted by committer time, newest first. When `since_timestamp` is
/// positive, commits whose committer time predates it are dropped; `0`
/// keeps the whole history and performs no per-commit lookup.
pub(crate) fn collect_commit_ids(
    repo: &Repository,
    branch_glob: &str,
    since_timestamp: i64,
) -> Result<Vec<Oid>, ScanError> {
    let mut revwalk = repo.revwalk().map_err(|source| ScanError::Walk { source })?;
    revwalk
        .set_sorting(Sort::TIME)
        .map_err(|source| ScanError::Walk { source })?;

    if branch_glob == "HEAD" {
        revwalk
            .push_head()
            .map_err(|source| ScanError::Walk { source })?;
    } else {
        revwalk
            .push_glob(branch_glob)
            .map_err(|source| ScanError::Walk { source })?;
    }

    // Walk errors on individual entries (e.g. a corrupt commit) drop that
    // entry; a partial commit list is preferable to a hard stop.
    let mut ids = Vec::new();
    for oid in revwalk.flatten() {
        if since_timestamp > 0 {
            match repo.find_commit(oid) {
                Ok(commit) if commit.time().seconds() >= since_timestamp => ids.push(oid),
                _ => {}
            }
        } else {
            ids.push(oid);
        }
    }

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Walk behavior against real repositories is covered by the integration
    // suite; here we only pin the glob fallback error path.
    #[test]
    fn bad_glob_on_empty_repo_yields_walk_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        // An empty repository has no HEAD commit to push.
        let err = collect_commit_ids(&repo, "HEAD", 0).unwrap_err();
        assert!(matches!(err, ScanError::Walk { .. }));
    }

    #[test]
    fn unmatched_glob_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        let ids = collect_commit_ids(&repo, "refs/heads/no-such-branch-*", 0).unwrap();
        assert!(ids.is_empty());
    }
}
