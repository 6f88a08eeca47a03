//! Path matchers bound to classification kinds.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use regex::Regex;

use crate::error::Result;

type PathPredicate = Arc<dyn Fn(&Path) -> bool + Send + Sync>;

/// A single matcher tested against an entry's path.
#[derive(Clone)]
pub enum Hook {
    /// Matches when the path string contains the text.
    Substring(String),
    /// Matches when the regex matches at the start of the path string.
    Pattern(Regex),
    /// Matches when the function returns true.
    Predicate(PathPredicate),
}

impl Hook {
    pub fn substring(text: impl Into<String>) -> Self {
        Self::Substring(text.into())
    }

    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(predicate))
    }

    pub fn matches(&self, path: &Path) -> bool {
        match self {
            Self::Predicate(predicate) => predicate(path),
            Self::Pattern(regex) => {
                let text = path.to_string_lossy();
                // leftmost match starts at 0 iff some match does
                regex.find(&text).is_some_and(|m| m.start() == 0)
            }
            Self::Substring(needle) => path.to_string_lossy().contains(needle.as_str()),
        }
    }

    /// Whether two hooks occupy the same slot in a dispatch table.
    ///
    /// Substrings and patterns compare by source text, predicates by
    /// identity of the shared function.
    pub fn same_key(&self, other: &Hook) -> bool {
        match (self, other) {
            (Self::Substring(a), Self::Substring(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            (Self::Predicate(a), Self::Predicate(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Substring(text) => f.debug_tuple("Substring").field(text).finish(),
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}
