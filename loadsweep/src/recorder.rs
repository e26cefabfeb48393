use crate::report::{LatencySummary, LoadParameter, RunResult};
use metrics_util::AtomicBucket;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Result of one attempted request. Produced exactly once per attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The request fully completed; wall-clock latency attached.
    Success(Duration),
    /// The attempt failed; failures carry no meaningful latency.
    Failure(FailureCause),
}

/// Why a failed attempt produced no latency measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// The transport reported a non-success completion.
    Transport,
    /// The request exceeded the configured timeout.
    Timeout,
    /// A worker could not construct its HTTP client; no attempt was made.
    ClientInit,
}

/// Thread-safe sink for per-request outcomes.
///
/// Counters are plain atomics and latencies go into an [`AtomicBucket`], so
/// any number of concurrent workers can record without a lock and without
/// any ordering requirement between them. [`OutcomeRecorder::snapshot`] is
/// only valid once all producers for the run have stopped; the sweep
/// controller enforces that by joining (closed-loop) or draining
/// (open-loop) before it reads.
pub struct OutcomeRecorder {
    success: AtomicU64,
    transport: AtomicU64,
    timeout: AtomicU64,
    client_init: AtomicU64,
    latency: AtomicBucket<Duration>,
}

impl OutcomeRecorder {
    pub fn new() -> Self {
        Self {
            success: AtomicU64::new(0),
            transport: AtomicU64::new(0),
            timeout: AtomicU64::new(0),
            client_init: AtomicU64::new(0),
            latency: AtomicBucket::new(),
        }
    }

    /// Appends one outcome. Safe to call from many tasks concurrently.
    pub fn record(&self, outcome: Outcome) {
        match outcome {
            Outcome::Success(latency) => {
                self.success.fetch_add(1, Ordering::Relaxed);
                self.latency.push(latency);
            }
            Outcome::Failure(cause) => self.record_failure(cause),
        }
    }

    /// Counts a failed attempt under its cause.
    pub fn record_failure(&self, cause: FailureCause) {
        let counter = match cause {
            FailureCause::Transport => &self.transport,
            FailureCause::Timeout => &self.timeout,
            FailureCause::ClientInit => &self.client_init,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn success_count(&self) -> u64 {
        self.success.load(Ordering::Relaxed)
    }

    pub fn failure_count(&self) -> u64 {
        self.transport.load(Ordering::Relaxed)
            + self.timeout.load(Ordering::Relaxed)
            + self.client_init.load(Ordering::Relaxed)
    }

    /// Derives the run's statistics from a quiesced recorder. Read-only;
    /// [`OutcomeRecorder::reset`] is the destructive half of the pair.
    ///
    /// Throughput is successes over the nominal run length. Latencies are
    /// sorted ascending; p95 is the value at index `floor(0.95 * count)`,
    /// 0-indexed and clamped to `count - 1`. A run with zero successes has
    /// no defined mean/p95/max and reports `None` rather than faulting.
    pub fn snapshot(&self, load: LoadParameter, nominal: Duration) -> RunResult {
        let success_count = self.success_count();
        let mut latencies = self.latency.data();
        latencies.sort_unstable();

        let latency = if latencies.is_empty() {
            None
        } else {
            let secs: Vec<f64> = latencies.iter().map(Duration::as_secs_f64).collect();
            let p95_idx =
                ((0.95 * latencies.len() as f64).floor() as usize).min(latencies.len() - 1);
            Some(LatencySummary {
                mean: Duration::from_secs_f64(statistical::mean(&secs)),
                p95: latencies[p95_idx],
                max: latencies[latencies.len() - 1],
            })
        };

        RunResult {
            load,
            throughput: success_count as f64 / nominal.as_secs_f64(),
            success_count,
            failure_count: self.failure_count(),
            timeout_count: self.timeout.load(Ordering::Relaxed),
            latency,
        }
    }

    /// Clears all per-run state. Called by the sweep controller between
    /// runs, never concurrently with active writers.
    pub fn reset(&self) {
        self.success.store(0, Ordering::Relaxed);
        self.transport.store(0, Ordering::Relaxed);
        self.timeout.store(0, Ordering::Relaxed);
        self.client_init.store(0, Ordering::Relaxed);
        self.latency.clear();
    }
}

impl Default for OutcomeRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder_with_secs(secs: &[u64]) -> OutcomeRecorder {
        let recorder = OutcomeRecorder::new();
        for &s in secs {
            recorder.record(Outcome::Success(Duration::from_secs(s)));
        }
        recorder
    }

    #[test]
    fn snapshot_of_known_latencies() {
        let recorder = recorder_with_secs(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        let result = recorder.snapshot(LoadParameter::Users(1), Duration::from_secs(10));

        assert_eq!(result.success_count, 10);
        assert_eq!(result.failure_count, 0);
        assert_eq!(result.throughput, 1.0);

        let latency = result.latency.unwrap();
        assert_eq!(latency.mean, Duration::from_millis(5_500));
        // floor(0.95 * 10) == 9
        assert_eq!(latency.p95, Duration::from_secs(10));
        assert_eq!(latency.max, Duration::from_secs(10));
    }

    #[test]
    fn p95_is_insertion_order_independent() {
        let nominal = Duration::from_secs(1);
        let a = recorder_with_secs(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10])
            .snapshot(LoadParameter::Users(1), nominal);
        let b = recorder_with_secs(&[10, 3, 7, 1, 9, 5, 2, 8, 6, 4])
            .snapshot(LoadParameter::Users(1), nominal);
        assert_eq!(a.latency.unwrap().p95, b.latency.unwrap().p95);
        assert_eq!(a.latency.unwrap().mean, b.latency.unwrap().mean);
    }

    #[test]
    fn failure_only_run_reports_no_data() {
        let recorder = OutcomeRecorder::new();
        recorder.record_failure(FailureCause::Transport);
        recorder.record_failure(FailureCause::Timeout);
        recorder.record_failure(FailureCause::ClientInit);

        let result = recorder.snapshot(LoadParameter::Rate(10.0), Duration::from_secs(1));
        assert_eq!(result.success_count, 0);
        assert_eq!(result.failure_count, 3);
        assert_eq!(result.timeout_count, 1);
        assert_eq!(result.throughput, 0.0);
        assert!(result.latency.is_none());
    }

    #[test]
    fn single_latency_stays_in_bounds() {
        // floor(0.95 * 1) == 0; the clamp keeps tiny samples indexable.
        let recorder = recorder_with_secs(&[3]);
        let latency = recorder
            .snapshot(LoadParameter::Users(1), Duration::from_secs(1))
            .latency
            .unwrap();
        assert_eq!(latency.p95, Duration::from_secs(3));
        assert_eq!(latency.max, Duration::from_secs(3));
    }

    #[test]
    fn reset_clears_everything() {
        let recorder = recorder_with_secs(&[1, 2]);
        recorder.record_failure(FailureCause::Transport);
        recorder.reset();

        let result = recorder.snapshot(LoadParameter::Users(1), Duration::from_secs(1));
        assert_eq!(result.success_count, 0);
        assert_eq!(result.failure_count, 0);
        assert!(result.latency.is_none());
    }

    #[test]
    fn latency_count_matches_success_count() {
        let recorder = recorder_with_secs(&[2, 4, 6]);
        recorder.record_failure(FailureCause::Transport);
        assert_eq!(recorder.latency.data().len() as u64, recorder.success_count());
    }
}
