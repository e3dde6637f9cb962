//! Content rules: capture-group matching with whitelist/blacklist refinement.
//!
//! A content rule's main pattern carries exactly one capturing group; the
//! captured substring is the evidence reported for each hit. Whitelist and
//! blacklist patterns refine candidates with unanchored (partial) matching
//! against the captured substring only, never against the surrounding buffer.
//!
//! Content is scanned as an explicit-length byte buffer: NUL bytes are
//! ordinary input, and non-UTF-8 evidence is reported lossily.

use regex::bytes::Regex;

use super::errors::RuleError;
use super::RuleMatch;

/// Compiles a content-rule main pattern: exactly one capturing group.
pub(crate) fn compile_capture(pattern: &str) -> Result<Regex, RuleError> {
    let regex = compile(pattern)?;
    // captures_len() counts the implicit whole-match group 0.
    let explicit = regex.captures_len() - 1;
    if explicit != 1 {
        return Err(RuleError::BadCaptureCount {
            pattern: pattern.to_string(),
            expected: 1,
            found: explicit,
        });
    }
    Ok(regex)
}

/// Compiles a whitelist/blacklist pattern: zero capturing groups.
pub(crate) fn compile_refinement(pattern: &str) -> Result<Regex, RuleError> {
    let regex = compile(pattern)?;
    let explicit = regex.captures_len() - 1;
    if explicit != 0 {
        return Err(RuleError::BadCaptureCount {
            pattern: pattern.to_string(),
            expected: 0,
            found: explicit,
        });
    }
    Ok(regex)
}

fn compile(pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// A compiled content-level detection rule.
#[derive(Debug)]
pub(crate) struct ContentRule {
    name: String,
    pattern: Regex,
    whitelist: Vec<Regex>,
    blacklist: Vec<Regex>,
}

impl ContentRule {
    /// Compiles all three pattern sets up front.
    ///
    /// Fails with [`RuleError::InvalidPattern`] on any compile error and
    /// [`RuleError::BadCaptureCount`] when the main pattern does not have
    /// exactly one capturing group or a refinement pattern has any.
    pub(crate) fn compile(
        name: String,
        pattern: &str,
        whitelist: &[String],
        blacklist: &[String],
    ) -> Result<Self, RuleError> {
        let pattern = compile_capture(pattern)?;
        let whitelist = whitelist
            .iter()
            .map(|p| compile_refinement(p))
            .collect::<Result<Vec<_>, _>>()?;
        let blacklist = blacklist
            .iter()
            .map(|p| compile_refinement(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name,
            pattern,
            whitelist,
            blacklist,
        })
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Pattern source, used to rebuild the store-level prefilter.
    pub(crate) fn pattern_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Appends every surviving capture in `content` to `out`.
    ///
    /// Occurrences are consumed left to right, non-overlapping. A candidate
    /// is dropped when any blacklist pattern partially matches it, or when
    /// the whitelist is non-empty and no whitelist pattern does.
    pub(crate) fn scan_into<'r>(&'r self, content: &[u8], out: &mut Vec<RuleMatch<'r>>) {
        for caps in self.pattern.captures_iter(content) {
            // Group 1 can sit in a non-participating alternation branch.
            let Some(capture) = caps.get(1) else {
                continue;
            };
            let candidate = capture.as_bytes();

            if self.blacklist.iter().any(|re| re.is_match(candidate)) {
                continue;
            }
            if !self.whitelist.is_empty()
                && !self.whitelist.iter().any(|re| re.is_match(candidate))
            {
                continue;
            }

            out.push(RuleMatch {
                rule_name: &self.name,
                text: String::from_utf8_lossy(candidate).into_owned(),
            });
        }
    }
}
