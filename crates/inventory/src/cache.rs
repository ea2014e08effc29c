//! Freshness-window cache in front of the aggregation pipeline.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Default freshness window: five minutes.
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Served from the cache; nothing was recomputed.
    Hit,
    /// Recomputed and stored.
    Miss,
}

#[derive(Debug)]
struct CacheEntry<T> {
    value: Arc<T>,
    computed_at: DateTime<Utc>,
}

/// Holds the last computed value and when it was computed.
///
/// A lookup at `now` is fresh when `now - computed_at < freshness`. Values are
/// shared as `Arc` so repeated hits hand out the same allocation.
#[derive(Debug)]
pub struct CacheGate<T> {
    freshness: Duration,
    entry: Option<CacheEntry<T>>,
}

impl<T> CacheGate<T> {
    pub fn new(freshness: Duration) -> Self {
        Self { freshness, entry: None }
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    pub fn computed_at(&self) -> Option<DateTime<Utc>> {
        self.entry.as_ref().map(|e| e.computed_at)
    }

    /// Current value regardless of age.
    pub fn current(&self) -> Option<&Arc<T>> {
        self.entry.as_ref().map(|e| &e.value)
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        let Some(entry) = &self.entry else {
            return false;
        };
        // A clock that went backwards yields a negative age, which still counts as fresh.
        match (now - entry.computed_at).to_std() {
            Ok(age) => age < self.freshness,
            Err(_) => true,
        }
    }

    /// Cached value if still fresh at `now`.
    pub fn get_fresh(&self, now: DateTime<Utc>) -> Option<Arc<T>> {
        if self.is_fresh(now) {
            self.current().cloned()
        } else {
            None
        }
    }

    /// Store a freshly computed value, restarting the freshness window.
    pub fn store(&mut self, now: DateTime<Utc>, value: T) -> Arc<T> {
        let value = Arc::new(value);
        self.entry = Some(CacheEntry {
            value: Arc::clone(&value),
            computed_at: now,
        });
        value
    }

    /// Swap in a derived value without restarting the freshness window.
    ///
    /// Used for mutations: the collection changes but was not recomputed from
    /// source. Only a computed entry can be replaced; with no entry this is a
    /// no-op returning `None`, so the next lookup still misses.
    pub fn replace(&mut self, value: T) -> Option<Arc<T>> {
        let entry = self.entry.as_mut()?;
        entry.value = Arc::new(value);
        Some(Arc::clone(&entry.value))
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Return the fresh value, or compute, store and return a new one.
    pub fn load_with<E>(
        &mut self,
        now: DateTime<Utc>,
        compute: impl FnOnce() -> Result<T, E>,
    ) -> Result<(Arc<T>, CacheStatus), E> {
        if let Some(value) = self.get_fresh(now) {
            return Ok((value, CacheStatus::Hit));
        }
        let value = compute()?;
        Ok((self.store(now, value), CacheStatus::Miss))
    }
}

impl<T> Default for CacheGate<T> {
    fn default() -> Self {
        Self::new(DEFAULT_FRESHNESS)
    }
}
