use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Groups – ordered key → members mapping
// ---------------------------------------------------------------------------

/// An ordered mapping from group key to the members of that group.
///
/// Keys keep the order in which they were first seen and members keep their
/// input order. The entries are stored as an explicit sequence of pairs so the
/// ordering never depends on a hash map's iteration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Groups<T> {
    entries: Vec<(String, Vec<T>)>,
}

impl<T> Default for Groups<T> {
    fn default() -> Self {
        Groups {
            entries: Vec::new(),
        }
    }
}

impl<T> Groups<T> {
    /// Partition `items` by `key`.
    pub fn from_items<I, F>(items: I, mut key: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&T) -> String,
    {
        let mut entries: Vec<(String, Vec<T>)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for item in items {
            let k = key(&item);
            match positions.get(&k) {
                Some(&pos) => entries[pos].1.push(item),
                None => {
                    positions.insert(k.clone(), entries.len());
                    entries.push((k, vec![item]));
                }
            }
        }

        Groups { entries }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Members of one group.
    pub fn get(&self, key: &str) -> Option<&Vec<T>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, members)| members)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> + '_ {
        self.entries
            .iter()
            .map(|(k, members)| (k.as_str(), members.as_slice()))
    }

    /// Reduce each group to a single value, keeping key order.
    pub fn map_values<U, F>(&self, mut f: F) -> Vec<(String, U)>
    where
        F: FnMut(&[T]) -> U,
    {
        self.entries
            .iter()
            .map(|(k, members)| (k.clone(), f(members)))
            .collect()
    }
}
