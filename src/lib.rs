//! Parallel git-history scanner for secret-like strings.
//!
//! `repscan` walks every eligible commit of a repository, diffs each commit
//! against its single parent, and runs a user-configured set of regex rules
//! over the content and path of every introduced file revision. Each hit
//! becomes one [`Finding`] attributing the matched substring to the commit
//! and file that introduced it.
//!
//! High-level flow:
//! 1. Build a [`RuleStore`]: content rules (one capturing group, optional
//!    whitelist/blacklist refinement), file-name rules, and ignored
//!    extension/path sets.
//! 2. Hand the store to a [`Scanner`] and call [`Scanner::scan`] with a
//!    repository path and a reference glob (`refs/heads/*` conventions, or
//!    the literal `HEAD`).
//! 3. Workers fan out over the commit list, skipping merge commits and
//!    binary blobs, and merge findings into one unordered vector.
//!
//! ```no_run
//! use repscan::{RuleStore, Scanner};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut rules = RuleStore::new();
//! rules.add_content_rule("aws-access-key", r"(AKIA[0-9A-Z]{16})", &[], &[])?;
//! rules.add_ignored_file_extension("lock")?;
//!
//! let scanner = Scanner::new(rules);
//! let findings = scanner.scan("/path/to/repo".as_ref(), "refs/heads/*")?;
//! for finding in &findings {
//!     println!("{}: {} in {}", finding.rule_name, finding.matched, finding.file_path);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Rule patterns use the `regex` crate dialect: RE2-compatible, linear-time,
//! no backreferences or lookaround. This is a visible contract to rule
//! authors.

pub mod finding;
pub mod git_scan;
pub mod rules;

pub use finding::Finding;
pub use git_scan::{read_blob, ScanConfig, ScanError, Scanner};
pub use rules::{RuleError, RuleMatch, RuleStore};
