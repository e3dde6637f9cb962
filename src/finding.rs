//! Output record for a single rule hit.
//!
//! A [`Finding`] pairs one matched substring with the commit and file
//! revision that introduced it. Findings are flat, owned, and serializable so
//! hosts can ship them across process boundaries without extra glue.
//!
//! # Stable keys
//! The serialized form uses exactly these keys, in this meaning:
//! `commit_id`, `commit_message`, `commit_time`, `author_name`,
//! `author_email`, `file_path`, `file_oid`, `rule_name`, `match`. Renaming a
//! field here is a breaking change for every downstream consumer.

use serde::{Deserialize, Serialize};

/// One emitted result record.
///
/// Every value is a UTF-8 string. `commit_id` and `file_oid` are 40
/// lower-case hex characters; `commit_time` is ISO-8601 UTC with second
/// precision (`YYYY-MM-DDThh:mm:ss`). For a file-name rule, `matched` is the
/// file path itself; for a content rule it is the pattern's captured
/// substring.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Finding {
    /// Commit that introduced the matched content.
    pub commit_id: String,
    /// Full commit message, verbatim (including trailing newlines).
    pub commit_message: String,
    /// Committer time, UTC, `YYYY-MM-DDThh:mm:ss`.
    pub commit_time: String,
    /// Author name as recorded in the commit.
    pub author_name: String,
    /// Author email as recorded in the commit.
    pub author_email: String,
    /// New-side file path of the delta, POSIX separators.
    pub file_path: String,
    /// New-side blob object id.
    pub file_oid: String,
    /// Name of the rule that produced this finding.
    pub rule_name: String,
    /// Matched evidence. Serialized under the key `match`.
    #[serde(rename = "match")]
    pub matched: String,
}
