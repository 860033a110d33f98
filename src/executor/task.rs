//! Task representation and launch.

use super::handler::{self, ErrorHandler, ResultHandler};
use super::panic_handler::{PanicGuard, PanicReport};
use crate::config::Config;
use crate::error::{BoxError, Error};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Global task ID counter
static TASK_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    pub(crate) fn next() -> Self {
        TaskId(TASK_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// What a unit of work returns.
///
/// `Ok(Some(value))` is delivered to the result handler, `Ok(None)` means
/// there is nothing to deliver, and `Err` goes to the error handler.
pub type Outcome<T = ()> = std::result::Result<Option<T>, BoxError>;

type Work<T> = Box<dyn FnOnce() -> Outcome<T> + Send + 'static>;

/// A unit of work paired with the handlers that receive its outcome.
///
/// Configuration methods consume and return the runner, and [`start`](Self::start)
/// consumes it, so handlers cannot change once the task is running.
pub struct TaskRunner<T> {
    id: TaskId,
    work: Work<T>,
    error_handler: ErrorHandler,
    result_handler: Option<ResultHandler<T>>,
    config: Config,
}

impl<T: Send + 'static> TaskRunner<T> {
    /// Wrap `work` without running it. Errors go to
    /// [`default_error_handler`](crate::default_error_handler) until replaced.
    pub fn new<F>(work: F) -> Self
    where
        F: FnOnce() -> Outcome<T> + Send + 'static,
    {
        TaskRunner {
            id: TaskId::next(),
            work: Box::new(work),
            error_handler: handler::default_handler(),
            result_handler: None,
            config: Config::default(),
        }
    }

    pub fn with_error_handler<H>(mut self, handler: H) -> Self
    where
        H: FnOnce(Error) + Send + 'static,
    {
        self.error_handler = Box::new(handler);
        self
    }

    pub fn with_result_handler<H>(mut self, handler: H) -> Self
    where
        H: FnOnce(T) + Send + 'static,
    {
        self.result_handler = Some(Box::new(handler));
        self
    }

    /// Drop any result handler; successful values will be discarded.
    pub fn without_result_handler(mut self) -> Self {
        self.result_handler = None;
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn has_result_handler(&self) -> bool {
        self.result_handler.is_some()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the work on a new thread and return immediately.
    ///
    /// The thread invokes at most one handler. A panic in the work is
    /// recovered and reported to the error handler as [`Error::Panic`]. If the
    /// thread cannot be created the error handler is called on the current
    /// thread with [`Error::Spawn`].
    pub fn start(self) {
        let TaskRunner {
            id,
            work,
            error_handler,
            result_handler,
            config,
        } = self;

        let guard = PanicGuard::new(config.capture_backtrace);

        // whichever side runs first takes the handler: the task thread, or
        // this thread if spawning fails and the closure is dropped unrun
        let error_slot = Arc::new(Mutex::new(Some(error_handler)));
        let thread_slot = Arc::clone(&error_slot);

        let spawned = config.thread_builder(id).spawn(move || {
            let Some(error_handler) = thread_slot.lock().take() else {
                return;
            };
            tracing::debug!(task = id.as_u64(), "task thread started");
            let outcome = guard.execute(work);
            deliver(id, guard, outcome, error_handler, result_handler);
        });

        if let Err(e) = spawned {
            tracing::error!(task = id.as_u64(), error = %e, "failed to spawn task thread");
            let error_handler = error_slot.lock().take();
            if let Some(error_handler) = error_handler {
                notify_error(id, error_handler, Error::Spawn(e));
            }
        }
    }
}

impl<T> std::fmt::Debug for TaskRunner<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskRunner")
            .field("id", &self.id)
            .field("has_result_handler", &self.result_handler.is_some())
            .field("config", &self.config)
            .finish()
    }
}

fn deliver<T>(
    id: TaskId,
    guard: PanicGuard,
    outcome: Result<Outcome<T>, PanicReport>,
    error_handler: ErrorHandler,
    result_handler: Option<ResultHandler<T>>,
) {
    match outcome {
        Err(report) => report_panic(id, error_handler, report),
        Ok(Err(err)) => {
            tracing::debug!(task = id.as_u64(), error = %err, "task failed");
            notify_error(id, error_handler, Error::Task(err));
        }
        Ok(Ok(Some(value))) => match result_handler {
            Some(handler) => {
                tracing::debug!(task = id.as_u64(), "task completed with a value");
                isolate(id, "result", move || handler(value));
            }
            None => {
                tracing::debug!(task = id.as_u64(), "task completed, no result handler set");
                // the value's destructor is still user code
                if let Err(report) = guard.execute(move || drop(value)) {
                    report_panic(id, error_handler, report);
                }
            }
        },
        Ok(Ok(None)) => {
            tracing::debug!(task = id.as_u64(), "task completed without a value");
        }
    }
}

fn report_panic(id: TaskId, error_handler: ErrorHandler, report: PanicReport) {
    tracing::warn!(
        task = id.as_u64(),
        panic = report.message(),
        location = report.location(),
        "task panicked"
    );
    notify_error(id, error_handler, Error::Panic(report));
}

fn notify_error(id: TaskId, handler: ErrorHandler, err: Error) {
    isolate(id, "error", move || handler(err));
}

// A panicking handler is reported on stderr and never routed back into the
// error handler.
fn isolate<F: FnOnce()>(id: TaskId, kind: &'static str, f: F) {
    if let Err(report) = PanicGuard::new(false).execute(f) {
        eprintln!("taskguard: {} handler panicked: {}", kind, report.message());
        tracing::error!(
            task = id.as_u64(),
            handler = kind,
            panic = report.message(),
            location = report.location(),
            "handler panicked"
        );
    }
}
