use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

pub struct Metrics {
    // Counters
    total_runs: AtomicUsize,
    successful_runs: AtomicUsize,
    failed_runs: AtomicUsize,
    pairs_analyzed: AtomicUsize,
    entities_reported: AtomicUsize,
    entities_unresolved: AtomicUsize,
    lookup_failures: AtomicUsize,
    stats_failures: AtomicUsize,

    // Timing (in microseconds)
    total_run_time_us: AtomicU64,
}

impl Metrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            total_runs: AtomicUsize::new(0),
            successful_runs: AtomicUsize::new(0),
            failed_runs: AtomicUsize::new(0),
            pairs_analyzed: AtomicUsize::new(0),
            entities_reported: AtomicUsize::new(0),
            entities_unresolved: AtomicUsize::new(0),
            lookup_failures: AtomicUsize::new(0),
            stats_failures: AtomicUsize::new(0),
            total_run_time_us: AtomicU64::new(0),
        })
    }

    pub fn record_run(&self, success: bool, duration: std::time::Duration) {
        self.total_runs.fetch_add(1, Ordering::Relaxed);
        if success {
            self.successful_runs.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_runs.fetch_add(1, Ordering::Relaxed);
        }
        self.total_run_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_pair(&self, entities: usize) {
        self.pairs_analyzed.fetch_add(1, Ordering::Relaxed);
        self.entities_reported.fetch_add(entities, Ordering::Relaxed);
    }

    pub fn record_unresolved(&self) {
        self.entities_unresolved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_lookup_failure(&self) {
        self.lookup_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stats_failure(&self) {
        self.stats_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let runs = self.total_runs.load(Ordering::Relaxed);
        let total_us = self.total_run_time_us.load(Ordering::Relaxed) as f64;
        MetricsSnapshot {
            total_runs: runs,
            successful_runs: self.successful_runs.load(Ordering::Relaxed),
            failed_runs: self.failed_runs.load(Ordering::Relaxed),
            pairs_analyzed: self.pairs_analyzed.load(Ordering::Relaxed),
            entities_reported: self.entities_reported.load(Ordering::Relaxed),
            entities_unresolved: self.entities_unresolved.load(Ordering::Relaxed),
            lookup_failures: self.lookup_failures.load(Ordering::Relaxed),
            stats_failures: self.stats_failures.load(Ordering::Relaxed),
            avg_run_time_ms: if runs > 0 {
                total_us / runs as f64 / 1000.0
            } else {
                0.0
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub total_runs: usize,
    pub successful_runs: usize,
    pub failed_runs: usize,
    pub pairs_analyzed: usize,
    pub entities_reported: usize,
    pub entities_unresolved: usize,
    pub lookup_failures: usize,
    pub stats_failures: usize,
    pub avg_run_time_ms: f64,
}

pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn snapshot_reflects_counters() {
        let metrics = Metrics::new();
        metrics.record_run(true, Duration::from_millis(10));
        metrics.record_run(false, Duration::from_millis(30));
        metrics.record_pair(3);
        metrics.record_unresolved();
        metrics.record_stats_failure();

        let snap = metrics.snapshot();
        assert_eq!(snap.total_runs, 2);
        assert_eq!(snap.successful_runs, 1);
        assert_eq!(snap.failed_runs, 1);
        assert_eq!(snap.pairs_analyzed, 1);
        assert_eq!(snap.entities_reported, 3);
        assert_eq!(snap.entities_unresolved, 1);
        assert_eq!(snap.stats_failures, 1);
        assert!((snap.avg_run_time_ms - 20.0).abs() < 1.0);
    }
}
