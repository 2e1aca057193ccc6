//! TTL caching in front of a NAV history source.
//!
//! Entries carry their own expiry. An entry read after it expires is evicted
//! and reported as a miss; nothing sweeps the cache in the background.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::error::SourceResult;
use crate::history::SchemeHistory;
use crate::source::{NavHistorySource, SourceType};

/// Default time-to-live for cached histories.
pub const DEFAULT_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Cache key for a scheme.
#[must_use]
pub fn scheme_key(scheme_code: &str) -> String {
    format!("scheme_{scheme_code}")
}

// =============================================================================
// CLOCKS
// =============================================================================

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// The system monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset_ms: AtomicU64,
}

impl ManualClock {
    /// Creates a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset_ms: AtomicU64::new(0),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.offset_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

// =============================================================================
// CACHE
// =============================================================================

/// A key-value cache with per-entry time-to-live.
pub trait NavCache<V>: Send + Sync {
    /// Returns the value for `key` if present and not expired.
    fn get(&self, key: &str) -> Option<V>;

    /// Stores `value` under `key` for `ttl`.
    fn insert(&self, key: String, value: V, ttl: Duration);

    /// Removes `key`.
    fn invalidate(&self, key: &str);
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    /// `None` when the TTL runs past the clock's range: the entry never expires.
    expires_at: Option<Instant>,
}

impl<V> Entry<V> {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now <= at)
    }
}

/// Concurrent in-process TTL cache.
pub struct TtlCache<V, K = SystemClock> {
    entries: DashMap<String, Entry<V>>,
    clock: K,
}

impl<V> TtlCache<V> {
    /// Creates a cache on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<V> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, K: Clock> TtlCache<V, K> {
    /// Creates a cache on `clock`.
    pub fn with_clock(clock: K) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Number of stored entries, including expired ones not yet read.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl<V, K> NavCache<V> for TtlCache<V, K>
where
    V: Clone + Send + Sync,
    K: Clock,
{
    fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        if let Some(entry) = self.entries.get(key) {
            if entry.is_live(now) {
                return Some(entry.value.clone());
            }
        }

        // Expired or absent; the read guard is released above.
        if self.entries.remove_if(key, |_, e| !e.is_live(now)).is_some() {
            log::debug!("cache entry {key} expired");
        }
        None
    }

    fn insert(&self, key: String, value: V, ttl: Duration) {
        let expires_at = self.clock.now().checked_add(ttl);
        self.entries.insert(key, Entry { value, expires_at });
    }

    fn invalidate(&self, key: &str) {
        self.entries.remove(key);
    }
}

// =============================================================================
// CACHED SOURCE
// =============================================================================

/// A source that consults a cache before its inner source.
pub struct CachedSource<S, C> {
    inner: S,
    cache: C,
    ttl: Duration,
}

impl<S: NavHistorySource> CachedSource<S, TtlCache<SchemeHistory>> {
    /// Wraps `inner` with an in-process cache using [`DEFAULT_TTL`].
    pub fn new(inner: S) -> Self {
        Self::with_cache(inner, TtlCache::new(), DEFAULT_TTL)
    }
}

impl<S, C> CachedSource<S, C>
where
    S: NavHistorySource,
    C: NavCache<SchemeHistory>,
{
    /// Wraps `inner` with `cache`, storing fetched histories for `ttl`.
    pub fn with_cache(inner: S, cache: C, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    /// Drops the cached history of `scheme_code`.
    pub fn invalidate(&self, scheme_code: &str) {
        self.cache.invalidate(&scheme_key(scheme_code));
    }

    /// The wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// The cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }
}

impl<S, C> NavHistorySource for CachedSource<S, C>
where
    S: NavHistorySource,
    C: NavCache<SchemeHistory>,
{
    fn source_type(&self) -> SourceType {
        SourceType::Cached
    }

    fn fetch(&self, scheme_code: &str) -> SourceResult<SchemeHistory> {
        let key = scheme_key(scheme_code);
        if let Some(history) = self.cache.get(&key) {
            log::debug!("cache hit for {key}");
            return Ok(history);
        }

        log::debug!("cache miss for {key}");
        let history = self.inner.fetch(scheme_code)?;
        self.cache.insert(key, history.clone(), self.ttl);
        Ok(history)
    }
}
