// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt::{self, Debug};

/// Set of fields marked as changed since the last reconciliation pass.
///
/// Components only have a handful of observable fields, so this is a plain
/// vector that keeps insertion order and skips duplicates.
#[derive(Clone, PartialEq, Eq)]
pub struct Changed<K> {
    keys: Vec<K>,
}

impl<K> Default for Changed<K> {
    fn default() -> Self {
        Changed { keys: Vec::new() }
    }
}

impl<K> Changed<K>
where
    K: Copy + Eq,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` as changed. Returns `false` if it was already marked.
    pub fn insert(&mut self, key: K) -> bool {
        if self.has(key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    pub fn has(&self, key: K) -> bool {
        self.keys.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.keys.iter().copied()
    }
}

impl<K> FromIterator<K> for Changed<K>
where
    K: Copy + Eq,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut changed = Changed::new();
        for key in iter {
            changed.insert(key);
        }
        changed
    }
}

impl<K: Debug> Debug for Changed<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(&self.keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_collapse() {
        let mut changed = Changed::new();

        assert!(changed.insert('a'));
        assert!(changed.insert('b'));
        assert!(!changed.insert('a'));

        assert_eq!(changed.len(), 2);
        assert!(changed.has('a'));
        assert!(!changed.has('c'));
        assert_eq!(changed.iter().collect::<String>(), "ab");
    }

    #[test]
    fn collect_from_burst() {
        let changed: Changed<u8> = std::iter::repeat(7).take(1000).collect();

        assert_eq!(changed.len(), 1);
        assert_eq!(format!("{changed:?}"), "{7}");
    }
}
