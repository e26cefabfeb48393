use std::fmt;
use std::time::Duration;

/// The parameter value one run was driven at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadParameter {
    /// Closed-loop virtual-user population size.
    Users(usize),
    /// Open-loop mean arrival rate, requests per second.
    Rate(f64),
}

/// Statistics for one completed run within a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub load: LoadParameter,
    /// Successful requests per second over the nominal run length.
    pub throughput: f64,
    pub success_count: u64,
    pub failure_count: u64,
    /// Subset of `failure_count`: attempts that exceeded the request
    /// timeout.
    pub timeout_count: u64,
    /// `None` when the run had no successful request; mean/p95/max are
    /// undefined on an empty sample.
    pub latency: Option<LatencySummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencySummary {
    pub mean: Duration,
    pub p95: Duration,
    pub max: Duration,
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.load {
            LoadParameter::Users(n) => write!(f, "N={n}")?,
            LoadParameter::Rate(rate) => write!(f, "Rate={rate:.1}")?,
        }
        write!(f, " Throughput={:.2}", self.throughput)?;
        match &self.latency {
            Some(latency) => {
                write!(f, " MeanLatency={:?} P95={:?}", latency.mean, latency.p95)?;
                // Max latency is only part of the open-loop report.
                if matches!(self.load, LoadParameter::Rate(_)) {
                    write!(f, " Max={:?}", latency.max)?;
                }
            }
            None => {
                write!(f, " MeanLatency=undefined P95=undefined")?;
                if matches!(self.load, LoadParameter::Rate(_)) {
                    write!(f, " Max=undefined")?;
                }
            }
        }
        write!(
            f,
            " Failures={} Successes={}",
            self.failure_count, self.success_count
        )
    }
}
