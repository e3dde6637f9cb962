//! Fixture helpers: temporary repositories built with `git` CLI commands.
//!
//! Tests call [`git_available`] first and return early when `git` is not on
//! `PATH`, so the suite degrades gracefully on minimal environments.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

pub fn git_available() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

pub fn run_git(repo: &Path, args: &[&str]) {
    run_git_dated(repo, args, None);
}

/// Runs a git command with a fixed author/committer date when `date` is set
/// (format `YYYY-MM-DDThh:mm:ss`, taken as UTC).
pub fn run_git_dated(repo: &Path, args: &[&str], date: Option<&str>) {
    let mut cmd = Command::new("git");
    cmd.args(args).current_dir(repo);
    if let Some(date) = date {
        let stamp = format!("{date} +0000");
        cmd.env("GIT_AUTHOR_DATE", &stamp)
            .env("GIT_COMMITTER_DATE", &stamp);
    }
    let status = cmd.status().expect("failed to run git");
    assert!(status.success(), "git command failed: {args:?}");
}

pub fn git_output(repo: &Path, args: &[&str]) -> String {
    let out = Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .expect("failed to run git");
    assert!(out.status.success(), "git command failed: {args:?}");
    String::from_utf8(out.stdout).expect("git output not utf8")
}

pub fn init_repo() -> TempDir {
    let tmp = TempDir::new().unwrap();
    run_git(tmp.path(), &["init", "-b", "main"]);
    run_git(tmp.path(), &["config", "user.email", "author@example.com"]);
    run_git(tmp.path(), &["config", "user.name", "Author Name"]);
    run_git(tmp.path(), &["config", "commit.gpgsign", "false"]);
    tmp
}

/// Writes `content` to `name` and commits it with message `message`.
pub fn commit_file(repo: &Path, name: &str, content: &[u8], message: &str) -> String {
    commit_file_dated(repo, name, content, message, None)
}

pub fn commit_file_dated(
    repo: &Path,
    name: &str,
    content: &[u8],
    message: &str,
    date: Option<&str>,
) -> String {
    std::fs::write(repo.join(name), content).unwrap();
    run_git(repo, &["add", name]);
    run_git_dated(repo, &["commit", "-m", message], date);
    head_commit(repo)
}

pub fn head_commit(repo: &Path) -> String {
    git_output(repo, &["rev-parse", "HEAD"]).trim().to_string()
}
