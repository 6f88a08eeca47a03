//! Result containers produced by traversals.

/// Ordered `ref_id -> value` pairs in visit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accumulated<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for Accumulated<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Accumulated<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, ref_id: String, value: T) {
        self.entries.push((ref_id, value));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, ref_id: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(key, _)| key == ref_id)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, ref_id: &str) -> bool {
        self.get(ref_id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn into_values(self) -> Vec<T> {
        self.entries.into_iter().map(|(_, value)| value).collect()
    }
}

impl<T> IntoIterator for Accumulated<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Outcome of an exact lookup that matched at least once.
///
/// A single match comes back bare, several come back as an ordered list.
/// No match at all is `None` at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquired<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Acquired<T> {
    /// Shapes a list of matches by cardinality.
    pub fn from_matches(mut matches: Vec<T>) -> Option<Self> {
        match matches.len() {
            0 => None,
            1 => matches.pop().map(Self::One),
            _ => Some(Self::Many(matches)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(values) => values.len(),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}
