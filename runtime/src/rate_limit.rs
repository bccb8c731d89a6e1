//! Per-client fixed-window rate limiter.
//!
//! Each client key owns a counter that is lazily reset when its one-window
//! interval has elapsed. The window boundary is per key, anchored at the
//! key's first request of the window; a client can therefore burst up to
//! twice the limit across a boundary, which is the accepted trade-off of the
//! fixed-window scheme.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

const DEFAULT_MAX_KEYS: usize = 10_000;

#[derive(Debug)]
struct WindowCounter {
    window_start: Instant,
    count: u32,
    last_seen: Instant,
}

/// Fixed-window request counter keyed by client identity.
///
/// `allow` is synchronous and lock-bound, safe to call from middleware
/// without awaiting.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    limit: u32,
    window: Duration,
    max_keys: usize,
    counters: RwLock<HashMap<String, Arc<Mutex<WindowCounter>>>>,
}

impl FixedWindowLimiter {
    /// Create a limiter admitting `limit` requests per key per `window`.
    #[must_use]
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            max_keys: DEFAULT_MAX_KEYS,
            counters: RwLock::new(HashMap::new()),
        }
    }

    /// Cap the number of tracked keys before stale counters are swept.
    #[must_use]
    pub fn with_max_keys(mut self, max_keys: usize) -> Self {
        self.max_keys = max_keys;
        self
    }

    /// Count one request for `key` and report whether it is within the limit.
    pub fn allow(&self, key: &str) -> bool {
        self.allow_at(key, Instant::now())
    }

    /// Number of client keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn allow_at(&self, key: &str, now: Instant) -> bool {
        let counter = self.counter_for(key, now);
        let mut counter = counter.lock().unwrap_or_else(PoisonError::into_inner);

        if now.duration_since(counter.window_start) >= self.window {
            counter.window_start = now;
            counter.count = 0;
        }
        counter.count += 1;
        counter.last_seen = now;

        let allowed = counter.count <= self.limit;
        if !allowed {
            metrics::counter!("rate_limit.rejected.total").increment(1);
        }
        allowed
    }

    fn counter_for(&self, key: &str, now: Instant) -> Arc<Mutex<WindowCounter>> {
        if let Some(counter) = self
            .counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
        {
            return Arc::clone(counter);
        }

        let mut counters = self.counters.write().unwrap_or_else(PoisonError::into_inner);
        if counters.len() >= self.max_keys {
            Self::sweep(&mut counters, now, self.window);
        }
        Arc::clone(
            counters
                .entry(key.to_string())
                .or_insert_with(|| {
                    Arc::new(Mutex::new(WindowCounter {
                        window_start: now,
                        count: 0,
                        last_seen: now,
                    }))
                }),
        )
    }

    /// Drop counters whose window has fully expired. An expired counter
    /// carries no admission state, its next request would reset it anyway.
    fn sweep(
        counters: &mut HashMap<String, Arc<Mutex<WindowCounter>>>,
        now: Instant,
        window: Duration,
    ) {
        let before = counters.len();
        counters.retain(|_, counter| {
            let counter = counter.lock().unwrap_or_else(PoisonError::into_inner);
            now.duration_since(counter.last_seen) < window
        });
        tracing::debug!(
            evicted = before - counters.len(),
            remaining = counters.len(),
            "rate limiter swept stale client counters"
        );
    }
}
