use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Stale keys are swept once every this many checks.
const CLEANUP_EVERY: u64 = 200;

/// Sliding-window limiter keyed by client, e.g. `"contact:203.0.113.7"`.
pub struct RateLimiter {
    max_attempts: u64,
    window: Duration,
    entries: Mutex<HashMap<String, VecDeque<Instant>>>,
    checks: AtomicU64,
}

impl RateLimiter {
    pub fn new(max_attempts: u64, window: Duration) -> Self {
        RateLimiter {
            max_attempts,
            window,
            entries: Mutex::new(HashMap::new()),
            checks: AtomicU64::new(0),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, VecDeque<Instant>>> {
        // A panic mid-update leaves at worst a stale timestamp behind.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn prune(attempts: &mut VecDeque<Instant>, cutoff: Option<Instant>) {
        let Some(cutoff) = cutoff else { return };
        while attempts.front().is_some_and(|t| *t <= cutoff) {
            attempts.pop_front();
        }
    }

    /// Record an attempt for `key`. Returns false, without recording, once
    /// the key has used up its attempts for the current window.
    pub fn check_and_record(&self, key: &str) -> bool {
        // Occasional cleanup (every CLEANUP_EVERY checks)
        if (self.checks.fetch_add(1, Ordering::Relaxed) + 1) % CLEANUP_EVERY == 0 {
            self.cleanup();
        }

        let now = Instant::now();
        let mut map = self.entries();
        let attempts = map.entry(key.to_string()).or_default();
        Self::prune(attempts, now.checked_sub(self.window));

        if (attempts.len() as u64) < self.max_attempts {
            attempts.push_back(now);
            true
        } else {
            false
        }
    }

    /// Drop keys with no attempts left inside the window.
    fn cleanup(&self) {
        let cutoff = Instant::now().checked_sub(self.window);
        self.entries().retain(|_, attempts| {
            Self::prune(attempts, cutoff);
            !attempts.is_empty()
        });
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.entries().len()
    }
}
