//! Elapsed-time capture for log contexts

use super::log_context::LogContext;
use std::time::Instant;

/// Records wall-clock duration into a context field when dropped.
///
/// The timer writes `elapsed_time` (milliseconds) into its target context
/// in [`Drop`], so the measurement lands even when the measured block
/// returns early or unwinds.
///
/// # Example
/// ```
/// use log_tuning::prelude::*;
///
/// let mut context = LogContext::new();
/// {
///     let _timer = ElapsedTimer::start(&mut context);
///     // work being measured
/// }
/// assert!(context.get("elapsed_time").is_some());
/// ```
pub struct ElapsedTimer<'a> {
    start: Instant,
    target: &'a mut LogContext,
}

impl<'a> ElapsedTimer<'a> {
    pub fn start(target: &'a mut LogContext) -> Self {
        Self {
            start: Instant::now(),
            target,
        }
    }

    /// Milliseconds since the timer started.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ElapsedTimer<'_> {
    fn drop(&mut self) {
        let elapsed = self.elapsed_ms();
        self.target.add_field("elapsed_time", elapsed);
    }
}
