//! Debug logging seam for the request pipeline.
//!
//! The client receives its logger at construction instead of reaching for a
//! process-wide handle. `LogFacade` forwards to the `log` crate so whatever
//! logger the host installs (e.g. `env_logger`) picks the messages up.

use std::fmt;

/// Receives debug messages from the request pipeline.
pub trait DebugLog: Send + Sync + fmt::Debug {
    fn debug(&self, message: &str);
}

/// Forwards to `log::debug!` under the `jotform` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl DebugLog for LogFacade {
    fn debug(&self, message: &str) {
        log::debug!(target: "jotform", "{message}");
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLog;

impl DebugLog for NoopLog {
    fn debug(&self, _message: &str) {}
}
