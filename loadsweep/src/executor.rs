use crate::recorder::{FailureCause, Outcome, OutcomeRecorder};
use std::future::Future;
use std::time::{Duration, Instant};

/// Issues exactly one request and deposits exactly one outcome.
///
/// Latency is wall-clock from just before dispatch to just after
/// completion, connection setup included; it measures what a caller of the
/// target perceives, not server processing time alone. A request that
/// outlives `timeout` is dropped and counted as a timeout failure; a
/// transport error is counted as a transport failure. Exactly one recorder
/// call happens per invocation, never zero, never both.
pub(crate) async fn execute<F, R, E>(request: F, timeout: Duration, recorder: &OutcomeRecorder)
where
    F: Future<Output = Result<R, E>>,
{
    let start = Instant::now();
    let outcome = match tokio::time::timeout(timeout, request).await {
        Ok(Ok(_)) => Outcome::Success(start.elapsed()),
        Ok(Err(_)) => Outcome::Failure(FailureCause::Transport),
        Err(_elapsed) => Outcome::Failure(FailureCause::Timeout),
    };

    #[cfg(feature = "metrics")]
    match outcome {
        Outcome::Success(latency) => {
            metrics::counter!("loadsweep.success").increment(1);
            metrics::histogram!("loadsweep.latency").record(latency.as_secs_f64());
        }
        Outcome::Failure(_) => {
            metrics::counter!("loadsweep.failure").increment(1);
        }
    }

    recorder.record(outcome);
}
