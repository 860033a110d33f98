//! Task execution infrastructure.
//!
//! This module provides the task runner, the handler callbacks it reports
//! to, and the panic guard that keeps a failing task from taking down its
//! thread.

pub mod handler;
pub mod panic_handler;
pub mod task;

pub use handler::{default_error_handler, write_error, ErrorHandler, ResultHandler};
pub use panic_handler::{PanicGuard, PanicReport};
pub use task::{Outcome, TaskId, TaskRunner};
