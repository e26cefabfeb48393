#![doc = include_str!("../README.md")]

mod config;
mod constants;
mod driver;
mod error;
mod executor;
mod http;
mod recorder;
mod report;
mod sweep;

pub use config::{LoadPattern, StepRange, SweepConfig};
pub use constants::{DEFAULT_COOLDOWN, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RUN_DURATION};
pub use error::Error;
pub use recorder::{FailureCause, Outcome, OutcomeRecorder};
pub use report::{LatencySummary, LoadParameter, RunResult};
pub use sweep::Sweep;

pub mod prelude {
    pub use crate::{sweep, Error, LoadParameter, RunResult, StepRange, Sweep};
}

/// Starts building a sweep against `target`.
///
/// Configure it with the [`Sweep`] builder methods and `.await` it to run.
pub fn sweep(target: &str) -> Sweep {
    Sweep::new(target)
}
