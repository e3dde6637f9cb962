//! Error types for rule construction.
//!
//! All rule regexes are compiled eagerly when a rule is added, so every
//! pattern problem surfaces at configuration time rather than mid-scan. The
//! enum is `#[non_exhaustive]`; consumers should include a fallback match
//! arm.

use std::fmt;

/// Errors from adding rules to a store or from pattern diagnostics.
#[derive(Debug)]
#[non_exhaustive]
pub enum RuleError {
    /// A user-supplied regex failed to compile.
    InvalidPattern {
        /// The offending pattern, verbatim.
        pattern: String,
        /// Compiler diagnostic from the regex engine.
        source: regex::Error,
    },
    /// A pattern compiled but has the wrong number of capturing groups.
    ///
    /// A content rule's main pattern must have exactly one capturing group
    /// (the reported match); whitelist and blacklist patterns must have none.
    BadCaptureCount {
        /// The offending pattern, verbatim.
        pattern: String,
        /// Capturing groups the position requires.
        expected: usize,
        /// Capturing groups the pattern actually has.
        found: usize,
    },
    /// A rule name, pattern, or ignore entry was empty.
    EmptyRule,
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid regex pattern \"{pattern}\": {source}")
            }
            Self::BadCaptureCount {
                pattern,
                expected,
                found,
            } => {
                write!(
                    f,
                    "pattern \"{pattern}\" has {found} capturing groups (expected {expected})"
                )
            }
            Self::EmptyRule => write!(f, "rule names, patterns, and ignore entries must be non-empty"),
        }
    }
}

impl std::error::Error for RuleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pattern_display() {
        let source = regex::bytes::Regex::new("(").unwrap_err();
        let err = RuleError::InvalidPattern {
            pattern: "(".to_string(),
            source,
        };
        let msg = format!("{err}");
        assert!(msg.contains("invalid regex pattern"));
        assert!(msg.contains('('));
    }

    #[test]
    fn bad_capture_count_display() {
        let err = RuleError::BadCaptureCount {
            pattern: "(a)(b)".to_string(),
            expected: 1,
            found: 2,
        };
        let msg = format!("{err}");
        assert!(msg.contains("(a)(b)"));
        assert!(msg.contains('1'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn invalid_pattern_preserves_source() {
        let source = regex::bytes::Regex::new("[").unwrap_err();
        let err = RuleError::InvalidPattern {
            pattern: "[".to_string(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
    }
}
