//! Callback types invoked when a task finishes.
//!
//! A launch calls at most one handler, at most once, so handlers are `FnOnce`
//! and only need to be `Send`. A handler shared across launches is cloned per
//! launch.

use crate::error::Error;
use std::io::{self, Write};

/// Receives the error of a failed task, including recovered panics.
pub type ErrorHandler = Box<dyn FnOnce(Error) + Send + 'static>;

/// Receives the value of a task that succeeded with `Some(value)`.
pub type ResultHandler<T> = Box<dyn FnOnce(T) + Send + 'static>;

/// Error handler installed on every new [`TaskRunner`](crate::TaskRunner).
///
/// Writes the error to stderr and does nothing else.
pub fn default_error_handler(err: Error) {
    let _ = write_error(&mut io::stderr().lock(), &err);
}

/// Writes the line [`default_error_handler`] prints.
pub fn write_error<W: Write>(out: &mut W, err: &Error) -> io::Result<()> {
    writeln!(out, "Error in task thread: {}", err)
}

pub(crate) fn default_handler() -> ErrorHandler {
    Box::new(default_error_handler)
}
