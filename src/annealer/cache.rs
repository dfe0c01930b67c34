use crate::error::AnnealResult;
use crate::problem::CanonicalKey;
use fnv::FnvHashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

/// Solution -> cost memo for a single annealing run.
///
/// Never share one across runs or problems: the same coordinates can mean
/// something else under another problem.
#[derive(Debug)]
pub struct MemoCache<K> {
    entries: FnvHashMap<K, f64>,
    hits: usize,
    misses: usize,
}

impl<K: Eq + Hash> Default for MemoCache<K> {
    fn default() -> Self {
        Self {
            entries: FnvHashMap::default(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<K: Eq + Hash> MemoCache<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached cost of `solution`, running `compute` on a miss.
    /// A failed computation leaves the cache untouched.
    pub fn get_or_compute<S, F>(&mut self, solution: &S, compute: F) -> AnnealResult<f64>
    where
        S: CanonicalKey<Key = K>,
        F: FnOnce() -> AnnealResult<f64>,
    {
        match self.entries.entry(solution.canonical_key()) {
            Entry::Occupied(e) => {
                self.hits += 1;
                Ok(*e.get())
            }
            Entry::Vacant(v) => {
                self.misses += 1;
                let cost = compute()?;
                v.insert(cost);
                Ok(cost)
            }
        }
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
