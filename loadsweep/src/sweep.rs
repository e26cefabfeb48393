//! Sweep controller: iterates the load parameter and collects one
//! [`RunResult`] per value.
use crate::config::{LoadPattern, StepRange, SweepConfig};
use crate::constants::DRAIN_MARGIN;
use crate::driver::{run_closed_loop, run_open_loop};
use crate::error::Error;
use crate::http;
use crate::recorder::OutcomeRecorder;
use crate::report::{LoadParameter, RunResult};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};
use tokio::time::sleep;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// Handle for a configured sweep.
///
/// Built by [`crate::sweep`], refined with the builder methods, and
/// awaited to run: the output is one [`RunResult`] per swept parameter
/// value, in the order the sweep was declared.
#[pin_project::pin_project]
pub struct Sweep {
    config: SweepConfig,
    runner_fut: Option<Pin<Box<dyn Future<Output = Result<Vec<RunResult>, Error>> + Send>>>,
}

impl Sweep {
    pub(crate) fn new(target: &str) -> Self {
        Self {
            config: SweepConfig::new(target),
            runner_fut: None,
        }
    }

    /// Sweep closed-loop user populations, each user pacing itself with
    /// `think_time` between requests.
    pub fn closed_loop(mut self, users: StepRange<usize>, think_time: Duration) -> Self {
        self.config.pattern = Some(LoadPattern::ClosedLoop { users, think_time });
        self
    }

    /// Sweep open-loop mean arrival rates (requests per second).
    pub fn open_loop(mut self, rates: StepRange<f64>) -> Self {
        self.config.pattern = Some(LoadPattern::OpenLoop { rates });
        self
    }

    /// Nominal wall-clock length of each run.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.config.run_duration = duration;
        self
    }

    /// Per-request timeout. Exceeding it fails that request only; nothing
    /// else is cancelled.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Pause between consecutive runs.
    pub fn cooldown(mut self, cooldown: Duration) -> Self {
        self.config.cooldown = cooldown;
        self
    }

    /// Seeds open-loop arrival sampling so a sweep can be replayed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }
}

impl Future for Sweep {
    type Output = Result<Vec<RunResult>, Error>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.runner_fut.is_none() {
            let config = self.config.clone();
            self.runner_fut = Some(Box::pin(async move { run_sweep(config).await }));
        }

        if let Some(runner) = &mut self.runner_fut {
            runner.as_mut().poll(cx)
        } else {
            unreachable!()
        }
    }
}

/// Runs the configured sweep against the target over HTTP.
pub(crate) async fn run_sweep(config: SweepConfig) -> Result<Vec<RunResult>, Error> {
    // The shared client is the one piece of setup allowed to abort the
    // whole sweep; once it exists, request failures are only ever recorded.
    let client = http::build_client()?;
    let url = config.target.clone();
    let transaction = move || http::fetch(client.clone(), url.clone());
    run_sweep_with(config, transaction).await
}

/// Sweep loop, generic over the transaction so the full controller
/// lifecycle is drivable without a network in tests.
pub(crate) async fn run_sweep_with<T, F, R, E>(
    config: SweepConfig,
    transaction: T,
) -> Result<Vec<RunResult>, Error>
where
    T: Fn() -> F + Send + Sync + Clone + 'static,
    F: Future<Output = Result<R, E>> + Send + 'static,
    R: Send + 'static,
    E: Send + 'static,
{
    let Some(pattern) = config.pattern.clone() else {
        return Err(Error::NoLoadPattern);
    };

    info!(
        "Sweeping {} at {} per run",
        config.target,
        humantime::format_duration(config.run_duration)
    );

    let recorder = Arc::new(OutcomeRecorder::new());
    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let mut results = Vec::new();

    match pattern {
        LoadPattern::ClosedLoop { users, think_time } => {
            for n in users.values() {
                if !results.is_empty() {
                    sleep(config.cooldown).await;
                }
                recorder.reset();

                let transaction = transaction.clone();
                let session = move || Ok::<_, Error>(transaction.clone());
                run_closed_loop(
                    n,
                    think_time,
                    config.run_duration,
                    config.request_timeout,
                    session,
                    recorder.clone(),
                )
                .await;

                // Joining every user has already quiesced the recorder.
                let result = recorder.snapshot(LoadParameter::Users(n), config.run_duration);
                info!("{result}");
                results.push(result);
            }
        }
        LoadPattern::OpenLoop { rates } => {
            for rate in rates.values() {
                if !results.is_empty() {
                    sleep(config.cooldown).await;
                }
                recorder.reset();

                run_open_loop(
                    rate,
                    config.run_duration,
                    config.request_timeout,
                    transaction.clone(),
                    recorder.clone(),
                    &mut rng,
                )
                .await?;

                // Detached arrivals may still be in flight; every straggler
                // gets longer than the request timeout to land.
                sleep(config.request_timeout + DRAIN_MARGIN).await;

                let result = recorder.snapshot(LoadParameter::Rate(rate), config.run_duration);
                info!("{result}");
                results.push(result);
            }
        }
    }

    Ok(results)
}
