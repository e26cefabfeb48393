use crate::executor::execute;
use crate::recorder::{FailureCause, OutcomeRecorder};
use rand::Rng;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// Drives a fixed population of virtual users for one run.
///
/// Each user sleeps a uniform random stagger in `[0, think_time)` so the
/// population does not fire in lockstep at time zero, builds its
/// per-user transaction from `session`, then alternates one request with
/// one fixed think-time sleep until the deadline passes. The deadline is
/// computed once at start and checked between requests only, so a request
/// in flight when it expires is allowed to finish; joining every user task
/// below is what guarantees the recorder has quiesced when this returns,
/// at the cost of the observed run overshooting its nominal length by up
/// to one request latency.
///
/// A `session` error records a single client-init failure for that user
/// and stops the user; the run keeps going.
pub(crate) async fn run_closed_loop<S, SE, T, F, R, E>(
    users: usize,
    think_time: Duration,
    run_duration: Duration,
    request_timeout: Duration,
    session: S,
    recorder: Arc<OutcomeRecorder>,
) where
    S: Fn() -> Result<T, SE> + Send + Sync + Clone + 'static,
    SE: Display + Send + 'static,
    T: Fn() -> F + Send + 'static,
    F: Future<Output = Result<R, E>> + Send + 'static,
    R: Send + 'static,
    E: Send + 'static,
{
    let deadline = Instant::now() + run_duration;
    debug!("Starting closed-loop run with {users} users");

    let mut tasks = Vec::with_capacity(users);
    for _ in 0..users {
        let session = session.clone();
        let recorder = recorder.clone();
        tasks.push(tokio::spawn(async move {
            let stagger = think_time.mul_f64(rand::thread_rng().gen::<f64>());
            tokio::time::sleep(stagger).await;

            let transaction = match session() {
                Ok(transaction) => transaction,
                Err(err) => {
                    warn!("User could not build its client: {err}");
                    recorder.record_failure(FailureCause::ClientInit);
                    return;
                }
            };

            while Instant::now() < deadline {
                execute(transaction(), request_timeout, &recorder).await;
                tokio::time::sleep(think_time).await;
            }
        }));
    }

    for task in tasks {
        // User tasks have no panicking paths; a join error only surfaces
        // when the runtime is shutting down.
        let _ = task.await;
    }
    debug!("Closed-loop run complete");
}
