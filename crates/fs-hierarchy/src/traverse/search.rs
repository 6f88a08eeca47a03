//! Predicate, wildcard and exact lookups built on [`Hierarchy::recurse`].

use regex::{Regex, RegexBuilder};

use super::accumulated::{Accumulated, Acquired};
use super::recurse::Visit;
use crate::error::Result;
use crate::hierarchy::Hierarchy;
use crate::storage::NodeIndex;

/// Compiles a `*` wildcard into a case-insensitive regex anchored at the
/// start of the name. Every other character matches literally.
pub fn wildcard_regex(pattern: &str) -> Result<Regex> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Ok(RegexBuilder::new(&format!("^{body}"))
        .case_insensitive(true)
        .build()?)
}

/// Compiles `pattern` so it must match a whole name, ignoring case.
pub fn exact_regex(pattern: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(&format!("^(?:{pattern})$"))
        .case_insensitive(true)
        .build()?)
}

impl<N, L> Hierarchy<N, L> {
    /// Every entry under `start` whose name satisfies `predicate`.
    ///
    /// Nodes are named by their ref_id and leaves by their key, as in
    /// [`recurse`](Self::recurse). Matches are keyed by ref_id.
    pub fn query<'a, P>(
        &'a self,
        start: NodeIndex,
        mut predicate: P,
    ) -> Result<Accumulated<Visit<'a, N, L>>>
    where
        P: FnMut(&str) -> bool,
    {
        self.recurse(start, |name, visit, _| predicate(name).then_some(visit))
    }

    /// Entries whose name starts with the `*` wildcard `pattern`.
    pub fn search<'a>(
        &'a self,
        start: NodeIndex,
        pattern: &str,
    ) -> Result<Accumulated<Visit<'a, N, L>>> {
        let regex = wildcard_regex(pattern)?;
        self.query(start, |name| regex.is_match(name))
    }

    /// Entries whose whole name matches the regular expression `pattern`.
    ///
    /// Returns `None` when nothing matches.
    pub fn acquire<'a>(
        &'a self,
        start: NodeIndex,
        pattern: &str,
    ) -> Result<Option<Acquired<Visit<'a, N, L>>>> {
        let regex = exact_regex(pattern)?;
        let matches = self.query(start, |name| regex.is_match(name))?;
        Ok(Acquired::from_matches(matches.into_values()))
    }
}
