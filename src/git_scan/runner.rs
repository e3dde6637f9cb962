//! Scan orchestration: configuration, worker fan-out, result merging.
//!
//! # Pipeline
//! 1. Open the repository and materialize the commit-id list (newest first).
//! 2. Fill a fixed-capacity queue with the ids and spawn the worker pool.
//! 3. Each worker opens its own handle onto the same object store and drains
//!    the queue, one commit at a time, appending findings under the shared
//!    mutex.
//! 4. Join all workers and return the merged vector.
//!
//! # Invariants
//! - The rule store is read-only for the whole scan; workers never mutate it.
//! - Finding order is unspecified: workers interleave commits, so callers
//!   must treat the result as a multiset.
//! - A commit that fails mid-scan contributes nothing and aborts nothing.
//!
//! git2 repository handles are not `Sync`, so the handle itself is per
//! worker; libgit2's process-wide state is reference-count initialized by
//! the git2 crate before the first open and torn down after the last drop.

use std::path::Path;
use std::sync::Mutex;
use std::thread;

use crossbeam_queue::ArrayQueue;
use git2::Repository;

use crate::finding::Finding;
use crate::rules::RuleStore;

use super::blob_fetch;
use super::commit_scan::scan_commit;
use super::commit_walk::collect_commit_ids;
use super::errors::ScanError;

/// Configuration for a repository scan.
///
/// # Defaults
///
/// | Parameter | Default | Rationale |
/// |-----------|---------|-----------|
/// | `workers` | `num_cpus::get()` | Match hardware parallelism |
/// | `max_blob_bytes` | 5 MiB | Larger blobs rarely hold secrets and dominate regex time |
/// | `since_timestamp` | 0 | Scan the whole history |
#[derive(Clone, Debug)]
pub struct ScanConfig {
    /// Number of worker threads draining the commit queue.
    ///
    /// Workers perform both repository I/O (tree diffs, blob loads) and CPU
    /// work (regex evaluation). More workers than commits is wasted; the
    /// runner caps the pool at the commit count.
    pub workers: usize,

    /// Content-scan byte cap per blob.
    ///
    /// Blobs above the cap still run against file-name rules; only their
    /// content scan is skipped.
    pub max_blob_bytes: u64,

    /// Unix-epoch cutoff for commit eligibility.
    ///
    /// Commits whose committer time predates the cutoff are not scanned.
    /// `0` disables the cutoff.
    pub since_timestamp: i64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get().max(1),
            max_blob_bytes: 5 * 1024 * 1024, // 5 MiB
            since_timestamp: 0,
        }
    }
}

/// History scanner: a rule store plus scan configuration.
///
/// The store is taken by value, so rules cannot change while scans run.
/// Scans are blocking and return only after every worker has finished.
pub struct Scanner {
    rules: RuleStore,
    config: ScanConfig,
}

impl Scanner {
    /// Creates a scanner with the default [`ScanConfig`].
    pub fn new(rules: RuleStore) -> Self {
        Self::with_config(rules, ScanConfig::default())
    }

    /// Creates a scanner with an explicit configuration.
    pub fn with_config(rules: RuleStore, config: ScanConfig) -> Self {
        Self { rules, config }
    }

    /// Returns the rule store backing this scanner.
    pub fn rules(&self) -> &RuleStore {
        &self.rules
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scans every eligible commit reachable from `branch_glob`.
    ///
    /// The glob is matched against reference names (`refs/heads/*`
    /// conventions); the literal `"HEAD"` starts from `HEAD` alone. The
    /// returned findings are unordered; running the same scan twice on an
    /// unchanged repository yields the same multiset.
    ///
    /// Fails with [`ScanError::RepositoryOpen`] when `repository_path` is
    /// not an openable repository and [`ScanError::Walk`] when the start set
    /// cannot be seeded. Per-commit failures are absorbed: the commit
    /// contributes no findings and the scan continues.
    pub fn scan(
        &self,
        repository_path: &Path,
        branch_glob: &str,
    ) -> Result<Vec<Finding>, ScanError> {
        let commit_ids = {
            let repo =
                Repository::open(repository_path).map_err(|source| ScanError::RepositoryOpen {
                    path: repository_path.to_path_buf(),
                    source,
                })?;
            collect_commit_ids(&repo, branch_glob, self.config.since_timestamp)?
            // The enumeration handle drops here; workers open their own.
        };

        if commit_ids.is_empty() || self.rules.is_empty() {
            return Ok(Vec::new());
        }

        let commit_count = commit_ids.len();
        let queue = ArrayQueue::new(commit_count);
        for oid in commit_ids {
            queue.push(oid).expect("queue sized to commit count");
        }

        let findings = Mutex::new(Vec::new());
        let workers = self.config.workers.max(1).min(commit_count);

        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| {
                    // The enumeration open above succeeded, so a failure
                    // here is transient; this worker simply contributes
                    // nothing and the others drain the queue.
                    let Ok(repo) = Repository::open(repository_path) else {
                        return;
                    };

                    while let Some(oid) = queue.pop() {
                        let _ = scan_commit(
                            &repo,
                            oid,
                            &self.rules,
                            self.config.max_blob_bytes,
                            &findings,
                        );
                    }
                });
            }
        });

        Ok(findings.into_inner().expect("findings mutex poisoned"))
    }

    /// Clones `url` into `checkout_path`, then scans the clone.
    ///
    /// Fails with [`ScanError::Clone`] when the remote cannot be cloned;
    /// scan failures are as for [`Scanner::scan`].
    pub fn scan_from_url(
        &self,
        url: &str,
        checkout_path: &Path,
        branch_glob: &str,
    ) -> Result<Vec<Finding>, ScanError> {
        Repository::clone(url, checkout_path).map_err(|source| ScanError::Clone {
            url: url.to_string(),
            source,
        })?;

        self.scan(checkout_path, branch_glob)
    }

    /// Reads the raw bytes of a blob by its 40-hex object id.
    ///
    /// A standalone operation: it does not consult the rule store and can be
    /// used to pull the full file revision behind a finding's `file_oid`.
    pub fn get_file_content(
        &self,
        repository_path: &Path,
        file_oid: &str,
    ) -> Result<Vec<u8>, ScanError> {
        blob_fetch::read_blob(repository_path, file_oid)
    }
}
