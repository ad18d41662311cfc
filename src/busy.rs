//! Shared loading indicator.
//!
//! Every request bumps a reference count for its duration; the desk is
//! "busy" while the count is non-zero. Decrements never go below zero.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Reference-counted busy flag, cheap to clone and share.
#[derive(Debug, Clone, Default)]
pub struct LoadingCounter {
    count: Arc<AtomicUsize>,
}

impl LoadingCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    /// Saturating decrement.
    pub fn stop(&self) {
        let _ = self
            .count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }

    /// Mark busy until the returned guard drops.
    pub fn begin(&self) -> BusyGuard {
        self.start();
        BusyGuard {
            counter: self.clone(),
        }
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn is_busy(&self) -> bool {
        self.count() > 0
    }
}

/// RAII guard for one in-flight operation.
pub struct BusyGuard {
    counter: LoadingCounter,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.counter.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_tracks_operation() {
        let loading = LoadingCounter::new();
        assert!(!loading.is_busy());
        {
            let _outer = loading.begin();
            let _inner = loading.begin();
            assert_eq!(loading.count(), 2);
        }
        assert!(!loading.is_busy());
    }

    #[test]
    fn stop_saturates_at_zero() {
        let loading = LoadingCounter::new();
        loading.stop();
        loading.stop();
        assert_eq!(loading.count(), 0);
        loading.start();
        assert!(loading.is_busy());
    }

    #[test]
    fn clones_share_count() {
        let loading = LoadingCounter::new();
        let shared = loading.clone();
        let _guard = shared.begin();
        assert!(loading.is_busy());
    }

    #[test]
    fn concurrent_guards_balance() {
        let loading = LoadingCounter::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let loading = loading.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let _guard = loading.begin();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(loading.count(), 0);
    }
}
