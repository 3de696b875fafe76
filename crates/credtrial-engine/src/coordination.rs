//! Shared per-run state.
//!
//! One `Coordination` is created per run and borrowed by every worker.
//! Counters and flags are atomics; the success slot and the error and
//! advisory lists sit behind mutexes, and every read goes through the
//! same mutex as the writers.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use credtrial_types::{Advisory, Candidate, ErrorRecord};

/// Longest uninterrupted sleep inside a cooldown.
const COOLDOWN_SLICE: Duration = Duration::from_millis(25);

/// Cloneable external abort switch. Once stopped, no new probe call
/// starts; calls already in flight finish normally.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A worker that panicked mid-push leaves the list usable.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
pub struct Coordination {
    attempts: AtomicU64,
    /// Set on an accepted candidate when the run stops on success.
    finished: AtomicBool,
    abort: StopHandle,
    success: Mutex<Option<Candidate>>,
    errors: Mutex<Vec<ErrorRecord>>,
    advisories: Mutex<Vec<Advisory>>,
}

impl Coordination {
    pub fn new(abort: StopHandle) -> Self {
        Self {
            abort,
            ..Self::default()
        }
    }

    /// Count one probe invocation. Returns the new total.
    pub fn record_attempt(&self) -> u64 {
        self.attempts.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Store the accepted candidate unless one is already stored.
    /// Returns true for the first writer only.
    pub fn record_success(&self, candidate: Candidate) -> bool {
        let mut slot = lock(&self.success);
        if slot.is_some() {
            return false;
        }
        *slot = Some(candidate);
        true
    }

    pub fn success(&self) -> Option<Candidate> {
        lock(&self.success).clone()
    }

    pub fn finish(&self) {
        self.finished.store(true, Ordering::SeqCst);
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.is_stopped()
    }

    /// True once no new probe call may start.
    pub fn should_stop(&self) -> bool {
        self.is_finished() || self.is_aborted()
    }

    pub fn push_error(&self, record: ErrorRecord) {
        lock(&self.errors).push(record);
    }

    pub fn push_advisory(&self, advisory: Advisory) {
        lock(&self.advisories).push(advisory);
    }

    pub fn errors(&self) -> Vec<ErrorRecord> {
        lock(&self.errors).clone()
    }

    pub fn advisories(&self) -> Vec<Advisory> {
        lock(&self.advisories).clone()
    }

    /// Sleep the calling worker for `duration`, waking early when the run
    /// stops. Other workers are unaffected.
    pub fn cooldown(&self, duration: Duration) {
        let deadline = Instant::now() + duration;
        loop {
            if self.should_stop() {
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            std::thread::sleep((deadline - now).min(COOLDOWN_SLICE));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_success_wins() {
        let coord = Coordination::default();
        assert!(coord.record_success(Candidate::original("first")));
        assert!(!coord.record_success(Candidate::original("second")));
        assert_eq!(coord.success().unwrap().value, "first");
    }

    #[test]
    fn test_concurrent_attempt_counting() {
        let coord = Coordination::default();
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..1_000 {
                        coord.record_attempt();
                    }
                });
            }
        });
        assert_eq!(coord.attempts(), 8_000);
    }

    #[test]
    fn test_abort_handle_stops_run() {
        let handle = StopHandle::new();
        let coord = Coordination::new(handle.clone());
        assert!(!coord.should_stop());
        handle.stop();
        assert!(coord.should_stop());
        assert!(coord.is_aborted());
        assert!(!coord.is_finished());
    }

    #[test]
    fn test_cooldown_returns_early_when_stopped() {
        let coord = Coordination::default();
        coord.finish();
        let started = Instant::now();
        coord.cooldown(Duration::from_secs(30));
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
