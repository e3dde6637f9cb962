//! File-name rules: path-evidence matching.
//!
//! A file-name rule fires on a partial match against the candidate path; the
//! reported evidence is the whole path, so there is no capture-count
//! constraint on the pattern.

use regex::Regex;

use super::errors::RuleError;

/// A compiled path-level detection rule.
#[derive(Debug)]
pub(crate) struct FileNameRule {
    name: String,
    pattern: Regex,
}

impl FileNameRule {
    pub(crate) fn compile(name: String, pattern: &str) -> Result<Self, RuleError> {
        let pattern = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { name, pattern })
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }
}
