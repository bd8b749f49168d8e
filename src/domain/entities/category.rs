use std::collections::HashSet;
use std::fmt;

/// A channel category as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

impl Category {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Category identifiers whose channels get translated.
///
/// Built once from configuration and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchedCategorySet {
    ids: HashSet<u64>,
}

impl WatchedCategorySet {
    pub fn new(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Any watched id, handy for adapters that have no real categories.
    pub fn first(&self) -> Option<u64> {
        self.ids.iter().min().copied()
    }
}

impl FromIterator<u64> for WatchedCategorySet {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self::new(iter)
    }
}
