use crate::error::Error;
use crate::executor::execute;
use crate::recorder::OutcomeRecorder;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Exp};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// Generates Poisson arrivals at mean rate `rate` for `run_duration`.
///
/// Inter-arrival gaps are drawn independently from an exponential
/// distribution with rate `rate`. Every arrival is dispatched as a
/// detached task with no handle retained; the loop never waits on request
/// completions, so in-flight concurrency is whatever the instantaneous
/// rate and service times produce. Dispatched requests may still be in
/// flight when this returns; the caller owns the drain window before it
/// snapshots the recorder.
pub(crate) async fn run_open_loop<T, F, R, E>(
    rate: f64,
    run_duration: Duration,
    request_timeout: Duration,
    transaction: T,
    recorder: Arc<OutcomeRecorder>,
    rng: &mut SmallRng,
) -> Result<(), Error>
where
    T: Fn() -> F + Send + Sync + 'static,
    F: Future<Output = Result<R, E>> + Send + 'static,
    R: Send + 'static,
    E: Send + 'static,
{
    if !rate.is_finite() || rate <= 0.0 {
        return Err(Error::InvalidArrivalRate(rate));
    }
    let gaps = Exp::new(rate).map_err(|_| Error::InvalidArrivalRate(rate))?;
    debug!("Starting open-loop run at {rate} arrivals/s");

    let start = Instant::now();
    while start.elapsed() < run_duration {
        let request = transaction();
        let recorder = recorder.clone();
        // Fire-and-forget: the only observable effect of a dispatched
        // request is its write into the recorder.
        tokio::spawn(async move {
            execute(request, request_timeout, &recorder).await;
        });

        let gap = gaps.sample(rng);
        tokio::time::sleep(Duration::from_secs_f64(gap)).await;
    }

    debug!("Open-loop arrival generation complete");
    Ok(())
}
