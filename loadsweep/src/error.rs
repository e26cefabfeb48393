use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The shared HTTP client could not be constructed. This fires before
    /// any run starts and aborts the whole sweep.
    #[error("failed to initialize the HTTP client: {0}")]
    ClientInit(#[from] reqwest::Error),

    /// An open-loop run was configured with a rate the exponential
    /// inter-arrival distribution cannot be built from.
    #[error("invalid arrival rate {0}; must be finite and positive")]
    InvalidArrivalRate(f64),

    /// The sweep was awaited without `closed_loop` or `open_loop` set.
    #[error("no load pattern configured; call `closed_loop` or `open_loop` first")]
    NoLoadPattern,
}
