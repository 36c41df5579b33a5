//! Banded lookup tables
//!
//! Rule tables in the ruleset are written as "up to X gives Y" ladders.
//! A `BandTable` holds those rows sorted by upper bound; lookup returns the
//! value of the first band that admits the key.

/// Upper edge of a band
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Upper<K> {
    /// Key must be strictly below the bound
    Below(K),
    /// Key may equal the bound
    AtMost(K),
}

impl<K: PartialOrd> Upper<K> {
    pub fn admits(&self, key: &K) -> bool {
        match self {
            Upper::Below(bound) => key < bound,
            Upper::AtMost(bound) => key <= bound,
        }
    }
}

/// Sorted `(upper bound, value)` rows
#[derive(Debug, Clone, Copy)]
pub struct BandTable<K: 'static, V: 'static> {
    rows: &'static [(Upper<K>, V)],
}

impl<K: PartialOrd + 'static, V: Copy + 'static> BandTable<K, V> {
    pub const fn new(rows: &'static [(Upper<K>, V)]) -> Self {
        Self { rows }
    }

    /// Value of the first band admitting `key`, `None` past the last band
    pub fn lookup(&self, key: &K) -> Option<V> {
        self.rows
            .iter()
            .find(|(upper, _)| upper.admits(key))
            .map(|(_, value)| *value)
    }

    /// Like [`lookup`](Self::lookup) but computes a value for keys past the
    /// last band
    pub fn lookup_or_else(&self, key: &K, beyond: impl FnOnce(&K) -> V) -> V {
        self.lookup(key).unwrap_or_else(|| beyond(key))
    }
}
