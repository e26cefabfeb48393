mod closed;
mod open;

pub(crate) use closed::run_closed_loop;
pub(crate) use open::run_open_loop;
