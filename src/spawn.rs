//! Shorthand for building a [`TaskRunner`] and starting it in one call.

use crate::error::Error;
use crate::executor::{Outcome, TaskRunner};

/// Run `work` on a new thread with the default error handler.
///
/// Any value the work returns is discarded.
pub fn run<T, F>(work: F)
where
    T: Send + 'static,
    F: FnOnce() -> Outcome<T> + Send + 'static,
{
    TaskRunner::new(work).start();
}

/// Run `work` on a new thread, reporting errors and panics to `error_handler`.
pub fn run_with_error_handler<T, F, E>(work: F, error_handler: E)
where
    T: Send + 'static,
    F: FnOnce() -> Outcome<T> + Send + 'static,
    E: FnOnce(Error) + Send + 'static,
{
    TaskRunner::new(work)
        .with_error_handler(error_handler)
        .start();
}

/// Run `work` on a new thread, passing a returned value to `result_handler`
/// and errors or panics to `error_handler`.
pub fn run_with_result_handler<T, F, R, E>(work: F, result_handler: R, error_handler: E)
where
    T: Send + 'static,
    F: FnOnce() -> Outcome<T> + Send + 'static,
    R: FnOnce(T) + Send + 'static,
    E: FnOnce(Error) + Send + 'static,
{
    TaskRunner::new(work)
        .with_result_handler(result_handler)
        .with_error_handler(error_handler)
        .start();
}
