//! Rule store: compiled rules, ignore sets, and the scan entry points.
//!
//! The store is built once, before a scan starts, and is read-only from then
//! on; [`crate::git_scan::Scanner`] takes it by value so post-build mutation
//! is ruled out by ownership. All regexes compile eagerly on `add_*`, which
//! keeps every pattern problem at configuration time.
//!
//! # Prefilter
//! Content patterns are mirrored into a [`RegexSet`] that answers "which
//! rules can possibly match this buffer" in a single pass. Buffers with no
//! possible match are rejected without touching any per-rule regex; for the
//! rest, only the seeded rules run their capture loops. The set never changes
//! which findings are emitted, only how fast non-matching buffers are
//! dismissed.

use ahash::AHashSet;
use memchr::memrchr;
use regex::bytes::RegexSet;

use super::content::{compile_capture, ContentRule};
use super::errors::RuleError;
use super::file_name::FileNameRule;
use super::RuleMatch;

/// Compiled content rules, file-name rules, and path-eligibility sets.
#[derive(Default)]
pub struct RuleStore {
    content_rules: Vec<ContentRule>,
    file_name_rules: Vec<FileNameRule>,
    ignored_extensions: AHashSet<String>,
    ignored_path_fragments: AHashSet<String>,
    /// Multi-pattern prefilter over `content_rules`, rebuilt on every add.
    /// `None` while no content rules exist.
    prefilter: Option<RegexSet>,
}

impl RuleStore {
    /// Creates an empty store. Empty ignore sets exclude nothing, and an
    /// empty rule list scans successfully with zero findings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a content rule; insertion order is evaluation order.
    ///
    /// The main `pattern` must have exactly one capturing group (the
    /// reported match); `whitelist` and `blacklist` patterns must have none.
    /// All three sets compile up front.
    pub fn add_content_rule(
        &mut self,
        name: &str,
        pattern: &str,
        whitelist: &[String],
        blacklist: &[String],
    ) -> Result<(), RuleError> {
        if name.is_empty() || pattern.is_empty() {
            return Err(RuleError::EmptyRule);
        }

        let rule = ContentRule::compile(name.to_string(), pattern, whitelist, blacklist)?;
        self.content_rules.push(rule);
        self.rebuild_prefilter(pattern)?;

        Ok(())
    }

    /// Adds a file-name rule; a partial match against a path reports the
    /// whole path as evidence. No capture-count constraint.
    pub fn add_file_name_rule(&mut self, name: &str, pattern: &str) -> Result<(), RuleError> {
        if name.is_empty() || pattern.is_empty() {
            return Err(RuleError::EmptyRule);
        }

        let rule = FileNameRule::compile(name.to_string(), pattern)?;
        self.file_name_rules.push(rule);

        Ok(())
    }

    /// Excludes an extension from scanning. Case-sensitive, no leading dot.
    /// Inserting the same extension twice is a no-op.
    pub fn add_ignored_file_extension(&mut self, extension: &str) -> Result<(), RuleError> {
        if extension.is_empty() {
            return Err(RuleError::EmptyRule);
        }
        self.ignored_extensions.insert(extension.to_string());
        Ok(())
    }

    /// Excludes any path containing `fragment` from scanning. Case-sensitive.
    /// Inserting the same fragment twice is a no-op.
    pub fn add_ignored_file_path(&mut self, fragment: &str) -> Result<(), RuleError> {
        if fragment.is_empty() {
            return Err(RuleError::EmptyRule);
        }
        self.ignored_path_fragments.insert(fragment.to_string());
        Ok(())
    }

    /// Decides whether a file path is eligible for scanning.
    ///
    /// The extension is everything after the last `.` (a path ending in `.`
    /// has the empty extension, which is an ordinary set member; a path with
    /// no `.` skips the extension check). Then any ignored fragment occurring
    /// anywhere in the path disqualifies it. Both checks are case-sensitive.
    pub fn should_scan_file_path(&self, path: &str) -> bool {
        if let Some(dot) = memrchr(b'.', path.as_bytes()) {
            let extension = &path[dot + 1..];
            if self.ignored_extensions.contains(extension) {
                return false;
            }
        }

        !self
            .ignored_path_fragments
            .iter()
            .any(|fragment| path.contains(fragment.as_str()))
    }

    /// Scans a byte buffer against every content rule in insertion order.
    ///
    /// Returns `(rule_name, captured_substring)` pairs; the same buffer
    /// position may yield findings from multiple rules. The buffer is
    /// scanned at its full length; it is never treated as NUL-terminated.
    pub fn scan_content(&self, content: &[u8]) -> Vec<RuleMatch<'_>> {
        let mut out = Vec::new();

        let Some(prefilter) = &self.prefilter else {
            return out;
        };
        let seeded = prefilter.matches(content);
        if !seeded.matched_any() {
            return out;
        }

        // RegexSet indices are insertion-ordered, so evaluation order is
        // preserved even when only a subset of rules is seeded.
        for index in seeded.iter() {
            self.content_rules[index].scan_into(content, &mut out);
        }

        out
    }

    /// Scans a path string against every file-name rule in insertion order.
    pub fn scan_file_name(&self, path: &str) -> Vec<RuleMatch<'_>> {
        self.file_name_rules
            .iter()
            .filter(|rule| rule.matches(path))
            .map(|rule| RuleMatch {
                rule_name: rule.name(),
                text: path.to_string(),
            })
            .collect()
    }

    /// Diagnostic helper: runs `pattern` against `content` under the same
    /// capture constraint as a content rule and returns every captured
    /// substring, left to right, non-overlapping.
    ///
    /// Equivalent to a content rule with `pattern` and empty whitelist and
    /// blacklist, with only the matched text reported.
    pub fn check_pattern(content: &[u8], pattern: &str) -> Result<Vec<String>, RuleError> {
        let regex = compile_capture(pattern)?;

        let mut matches = Vec::new();
        for caps in regex.captures_iter(content) {
            if let Some(capture) = caps.get(1) {
                matches.push(String::from_utf8_lossy(capture.as_bytes()).into_owned());
            }
        }

        Ok(matches)
    }

    /// Number of content rules currently in the store.
    pub fn content_rule_count(&self) -> usize {
        self.content_rules.len()
    }

    /// Number of file-name rules currently in the store.
    pub fn file_name_rule_count(&self) -> usize {
        self.file_name_rules.len()
    }

    /// True when no rule of either kind has been added.
    pub fn is_empty(&self) -> bool {
        self.content_rules.is_empty() && self.file_name_rules.is_empty()
    }

    /// Rebuilds the prefilter to cover all current content patterns.
    ///
    /// Each pattern already compiled individually, so a set failure can only
    /// come from combined compiled-size limits; it is reported against the
    /// pattern whose addition crossed the limit.
    fn rebuild_prefilter(&mut self, added_pattern: &str) -> Result<(), RuleError> {
        let set = RegexSet::new(self.content_rules.iter().map(ContentRule::pattern_str))
            .map_err(|source| RuleError::InvalidPattern {
                pattern: added_pattern.to_string(),
                source,
            })?;
        self.prefilter = Some(set);
        Ok(())
    }
}
