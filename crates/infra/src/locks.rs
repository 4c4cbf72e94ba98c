//! Keyed lock registry for pessimistic serialization.
//!
//! One mutex per key, handed out lazily. Callers acquire multiple keys in
//! sorted order so two batches touching overlapping pairs cannot deadlock.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use stockmaster_core::{DomainError, DomainResult};

/// Registry of per-key mutexes.
///
/// Locks are never removed; the key space (pairs, document ids) is small and
/// bounded by live data.
#[derive(Debug)]
pub struct KeyLocks<K> {
    registry: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K> Default for KeyLocks<K> {
    fn default() -> Self {
        Self {
            registry: Mutex::new(HashMap::new()),
        }
    }
}

impl<K> KeyLocks<K>
where
    K: Eq + Hash + Ord + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// The mutex for `key`, created on first use.
    pub fn handle(&self, key: &K) -> DomainResult<Arc<Mutex<()>>> {
        let mut registry = self
            .registry
            .lock()
            .map_err(|_| DomainError::conflict("lock registry poisoned"))?;
        Ok(Arc::clone(
            registry.entry(key.clone()).or_insert_with(|| Arc::new(Mutex::new(()))),
        ))
    }

    /// Mutexes for a set of keys, in the order given.
    ///
    /// Callers must pass keys sorted and deduplicated; acquisition order then
    /// matches across all contenders.
    pub fn handles(&self, keys: &[K]) -> DomainResult<Vec<Arc<Mutex<()>>>> {
        let mut registry = self
            .registry
            .lock()
            .map_err(|_| DomainError::conflict("lock registry poisoned"))?;
        Ok(keys
            .iter()
            .map(|key| {
                Arc::clone(
                    registry
                        .entry(key.clone())
                        .or_insert_with(|| Arc::new(Mutex::new(()))),
                )
            })
            .collect())
    }
}
