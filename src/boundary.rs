//! Top-level failure boundary.
//!
//! Every way a run can go wrong ends up here as a [RunFailure]: errors
//! returned by the workflow and panics raised anywhere inside it.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Why a run failed
#[derive(Debug)]
pub enum RunFailure {
    /// The workflow returned an error
    Failed(anyhow::Error),
    /// Something panicked
    Panicked(String),
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunFailure::Failed(err) => write!(f, "{}", err),
            RunFailure::Panicked(message) => write!(f, "Unhandled error: {}", message),
        }
    }
}

impl RunFailure {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> u8 {
        1
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Run `f`, converting an error or a panic into a [RunFailure].
pub fn guard<T, F>(f: F) -> Result<T, RunFailure>
where
    F: FnOnce() -> anyhow::Result<T>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(RunFailure::Failed(err)),
        Err(payload) => Err(RunFailure::Panicked(panic_message(payload))),
    }
}
