//! Cooperative cancellation shared between the pipeline and whoever can
//! interrupt it (the CLI's Ctrl-C handler, a test, a reporter).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::PipelineError;

/// Granularity of cancellation checks while pacing between requests.
const SLEEP_SLICE: Duration = Duration::from_millis(25);

/// Clonable cancellation flag. All clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Checkpoint: `Err(Cancelled)` once cancellation has been requested.
    pub fn check(&self) -> Result<(), PipelineError> {
        if self.is_cancelled() {
            Err(PipelineError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Sleep for `duration`, waking early with `Err(Cancelled)` if the
    /// token fires in the meantime.
    pub fn sleep(&self, duration: Duration) -> Result<(), PipelineError> {
        let deadline = Instant::now() + duration;
        loop {
            self.check()?;
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            thread::sleep((deadline - now).min(SLEEP_SLICE));
        }
    }
}
