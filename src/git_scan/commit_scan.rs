//! Per-commit scan: delta extraction and rule evaluation.
//!
//! Each worker invocation handles exactly one commit. The git objects it
//! touches (commit, trees, diff, blobs) are scoped to the invocation and
//! released on every exit path. Findings are fully constructed before the
//! shared output lock is taken; the critical section appends one record.
//!
//! # Skips
//! - Merge commits (two or more parents) contribute nothing: their "new"
//!   side against either parent would re-attribute pre-existing content.
//! - Deltas other than `Added`/`Modified` have no new content to attribute.
//! - Paths rejected by the store's eligibility check.
//! - Blobs the libgit2 heuristic flags as binary, and blobs under two bytes.
//! - Blobs over the configured byte cap skip content scanning only; their
//!   paths still run against the file-name rules.

use std::sync::Mutex;

use chrono::DateTime;
use git2::{Commit, Delta, Oid, Repository};

use crate::finding::Finding;
use crate::rules::RuleStore;

/// Blobs shorter than this cannot hold a reportable capture.
const MIN_BLOB_BYTES: usize = 2;

/// Commit metadata captured once and shared by every finding of the commit.
struct CommitRecord {
    commit_id: String,
    commit_message: String,
    commit_time: String,
    author_name: String,
    author_email: String,
}

impl CommitRecord {
    fn capture(commit: &Commit<'_>) -> Self {
        let commit_time = DateTime::from_timestamp(commit.time().seconds(), 0)
            .map(|time| time.format("%Y-%m-%dT%H:%M:%S").to_string())
            .unwrap_or_default();
        let author = commit.author();

        Self {
            commit_id: commit.id().to_string(),
            commit_message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
            commit_time,
            author_name: author.name().unwrap_or("").to_string(),
            author_email: author.email().unwrap_or("").to_string(),
        }
    }
}

/// Scans one commit and appends its findings to the shared output.
///
/// Errors are fatal for this commit only; the caller drops them and moves on
/// to the next queue entry.
pub(crate) fn scan_commit(
    repo: &Repository,
    oid: Oid,
    rules: &RuleStore,
    max_blob_bytes: u64,
    findings: &Mutex<Vec<Finding>>,
) -> Result<(), git2::Error> {
    let commit = repo.find_commit(oid)?;
    let parent_count = commit.parent_count();
    if parent_count > 1 {
        return Ok(());
    }

    let tree = commit.tree()?;
    let diff = if parent_count == 1 {
        let parent_tree = commit.parent(0)?.tree()?;
        repo.diff_tree_to_tree(Some(&parent_tree), Some(&tree), None)?
    } else {
        // Root commit: every tree entry is newly introduced.
        repo.diff_tree_to_tree(None, Some(&tree), None)?
    };

    let record = CommitRecord::capture(&commit);

    for delta in diff.deltas() {
        if !matches!(delta.status(), Delta::Added | Delta::Modified) {
            continue;
        }

        let new_file = delta.new_file();
        let Some(path) = new_file.path() else {
            continue;
        };
        let path = path.to_string_lossy();
        if !rules.should_scan_file_path(&path) {
            continue;
        }

        // A delta can reference a blob missing from a shallow or corrupt
        // store; skip the entry rather than aborting the commit.
        let Ok(blob) = repo.find_blob(new_file.id()) else {
            continue;
        };
        if blob.is_binary() || blob.size() < MIN_BLOB_BYTES {
            continue;
        }

        let mut matches = rules.scan_file_name(&path);
        if blob.size() as u64 <= max_blob_bytes {
            matches.extend(rules.scan_content(blob.content()));
        }
        if matches.is_empty() {
            continue;
        }

        let file_oid = new_file.id().to_string();
        for rule_match in matches {
            let finding = Finding {
                commit_id: record.commit_id.clone(),
                commit_message: record.commit_message.clone(),
                commit_time: record.commit_time.clone(),
                author_name: record.author_name.clone(),
                author_email: record.author_email.clone(),
                file_path: path.to_string(),
                file_oid: file_oid.clone(),
                rule_name: rule_match.rule_name.to_string(),
                matched: rule_match.text,
            };

            findings
                .lock()
                .expect("findings mutex poisoned")
                .push(finding);
        }
    }

    Ok(())
}
