//! Wildcard patterns over event types.
//!
//! A pattern is an event type in which `*` stands for one or more ASCII
//! letters. The wildcard never matches `/`, digits, underscores or the empty
//! string, so it always stays inside a single path segment:
//!
//! - `*/BalanceChanged` matches `Customer/BalanceChanged` and `Account/BalanceChanged`
//! - `Account/*locked` matches `Account/Blocked` and `Account/Unblocked`
//!
//! Every other character is literal, and the whole event type must match.

use regex::Regex;
use std::fmt;

const WILDCARD: char = '*';
const WILDCARD_CLASS: &str = "[A-Za-z]+";

/// A compiled event type pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Option<Regex>,
}

impl Pattern {
    /// Compile a pattern.
    ///
    /// Compilation does not fail: a pattern the regex engine refuses (only
    /// possible for absurdly large inputs) is logged and never matches.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let regex = match Regex::new(&translate(&source)) {
            Ok(regex) => Some(regex),
            Err(error) => {
                tracing::warn!(pattern = %source, %error, "event type pattern will never match");
                None
            }
        };
        Self { source, regex }
    }

    /// The pattern as it was written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `event_type` matches this pattern as a whole.
    pub fn matches(&self, event_type: &str) -> bool {
        self.regex
            .as_ref()
            .is_some_and(|regex| regex.is_match(event_type))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for Pattern {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}

/// Check a single event type against a single pattern.
///
/// Compiles the pattern on every call; keep a [`Pattern`] around when the
/// same pattern is checked repeatedly.
pub fn matches(event_type: &str, pattern: &str) -> bool {
    Pattern::new(pattern).matches(event_type)
}

fn translate(pattern: &str) -> String {
    let body = pattern
        .split(WILDCARD)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(WILDCARD_CLASS);
    format!("^{body}$")
}
