use crate::constants::{DEFAULT_COOLDOWN, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RUN_DURATION};
use std::ops::Add;
use std::time::Duration;

/// Full description of one sweep: the target, per-run timings, and the
/// load pattern to iterate. Immutable once the sweep starts.
#[derive(Clone, Debug)]
pub struct SweepConfig {
    pub target: String,
    pub run_duration: Duration,
    pub request_timeout: Duration,
    pub cooldown: Duration,
    pub seed: Option<u64>,
    pub pattern: Option<LoadPattern>,
}

impl SweepConfig {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            run_duration: DEFAULT_RUN_DURATION,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cooldown: DEFAULT_COOLDOWN,
            seed: None,
            pattern: None,
        }
    }
}

/// Which workload model the sweep drives and the range it iterates.
#[derive(Clone, Debug)]
pub enum LoadPattern {
    /// Fixed populations of virtual users, each pacing itself with
    /// `think_time` between requests.
    ClosedLoop {
        users: StepRange<usize>,
        think_time: Duration,
    },
    /// Poisson arrivals at each of the swept mean rates (per second),
    /// independent of request completions.
    OpenLoop { rates: StepRange<f64> },
}

/// Inclusive start/step/stop range for the swept load parameter.
///
/// `step` must be positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepRange<T> {
    pub start: T,
    pub step: T,
    pub stop: T,
}

impl<T> StepRange<T>
where
    T: Copy + PartialOrd + Add<Output = T>,
{
    pub fn new(start: T, step: T, stop: T) -> Self {
        Self { start, step, stop }
    }

    /// Values in declared order: start, start+step, ... while <= stop.
    pub fn values(self) -> impl Iterator<Item = T> {
        let step = self.step;
        let stop = self.stop;
        std::iter::successors((self.start <= stop).then_some(self.start), move |v| {
            let next = *v + step;
            (next <= stop).then_some(next)
        })
    }
}
