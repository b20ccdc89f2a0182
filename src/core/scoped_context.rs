//! Temporary context-imprinting loggers
//!
//! An owner type exposes its logger through a [`LoggerCell`]. For the span
//! of a [`ScopedContext`] guard the cell holds a scoped clone of the base
//! logger, so every message emitted through the owner carries the scoped
//! fields. When the guard drops the base logger is put back, whether the
//! scope exited normally or by panic.

use super::{log_context::LogContext, logger::Logger};
use parking_lot::RwLock;
use std::sync::Arc;

/// Swappable logger slot for an owner type.
///
/// Readers always see either the base logger or a scoped clone of it,
/// never a half-installed state.
pub struct LoggerCell {
    slot: RwLock<Option<Arc<Logger>>>,
}

impl LoggerCell {
    pub const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    pub fn with_logger(logger: Logger) -> Self {
        Self {
            slot: RwLock::new(Some(Arc::new(logger))),
        }
    }

    pub fn get(&self) -> Option<Arc<Logger>> {
        self.slot.read().clone()
    }

    pub fn set(&self, logger: Arc<Logger>) {
        *self.slot.write() = Some(logger);
    }

    fn swap(&self, logger: Option<Arc<Logger>>) -> Option<Arc<Logger>> {
        std::mem::replace(&mut *self.slot.write(), logger)
    }
}

impl Default for LoggerCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Implemented by types whose logger can be temporarily replaced by a
/// scoped clone.
pub trait HasLogger {
    fn logger_cell(&self) -> &LoggerCell;

    /// The logger currently installed for this owner, creating a default
    /// one named after the owner type when the cell is empty.
    fn logger(&self) -> Arc<Logger>
    where
        Self: Sized,
    {
        match self.logger_cell().get() {
            Some(logger) => logger,
            None => {
                let logger = Arc::new(Logger::new(default_logger_name::<Self>()));
                self.logger_cell().set(Arc::clone(&logger));
                logger
            }
        }
    }
}

/// Last path segment of the owner's type name, e.g. `app::http::Handler`
/// becomes `Handler`.
fn default_logger_name<T>() -> String {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full).to_string()
}

/// RAII guard that installs a scoped clone of the owner's logger.
///
/// The base logger is captured at entry, constructing a default when the
/// cell is empty, and put back in [`Drop`], which also runs during
/// unwinding, so a panic inside the scope cannot leave the scoped logger
/// installed. An owner that entered the scope without a logger keeps the
/// default afterwards.
pub struct ScopedContext<'a> {
    cell: &'a LoggerCell,
    base: Option<Arc<Logger>>,
}

impl<'a> ScopedContext<'a> {
    pub fn enter<O: HasLogger>(owner: &'a O, context: LogContext) -> Self {
        let cell = owner.logger_cell();
        let base = match cell.get() {
            Some(logger) => logger,
            None => Arc::new(Logger::new(default_logger_name::<O>())),
        };
        cell.swap(Some(Arc::new(base.scoped(context))));
        Self {
            cell,
            base: Some(base),
        }
    }
}

impl Drop for ScopedContext<'_> {
    fn drop(&mut self) {
        self.cell.swap(self.base.take());
    }
}

/// Run `f` with a scoped logger installed on `owner`.
///
/// `provider` builds the context fields lazily, only when the scope is
/// actually entered. The owner's original logger is restored before this
/// returns, including on panic.
///
/// # Example
/// ```
/// use log_tuning::prelude::*;
///
/// struct Worker {
///     logger: LoggerCell,
/// }
///
/// impl HasLogger for Worker {
///     fn logger_cell(&self) -> &LoggerCell {
///         &self.logger
///     }
/// }
///
/// let worker = Worker {
///     logger: LoggerCell::with_logger(Logger::new("worker")),
/// };
/// with_context(
///     &worker,
///     || LogContext::new().with_field("job_id", 7),
///     |w| w.logger().info("started"),
/// );
/// ```
pub fn with_context<O, P, F, R>(owner: &O, provider: P, f: F) -> R
where
    O: HasLogger,
    P: FnOnce() -> LogContext,
    F: FnOnce(&O) -> R,
{
    let _guard = ScopedContext::enter(owner, provider());
    f(owner)
}
