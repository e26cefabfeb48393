use std::time::Duration;

/// Default nominal wall-clock length of each run within a sweep.
pub const DEFAULT_RUN_DURATION: Duration = Duration::from_secs(60);

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Default pause between consecutive runs, so prior load drains fully and
/// statistics do not bleed across parameter values.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(5);

/// Added on top of the request timeout to size the post-run drain window
/// of open-loop runs.
pub(crate) const DRAIN_MARGIN: Duration = Duration::from_secs(1);
