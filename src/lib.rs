//! taskguard - fire-and-forget task threads that never take the process down
//!
//! A unit of work runs on its own OS thread. Whatever it produces is routed to
//! caller-supplied callbacks: a returned error or a recovered panic goes to the
//! error handler, a returned value goes to the result handler. A panic is
//! converted into [`Error::Panic`] carrying the payload text and a stack trace.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::mpsc;
//! use taskguard::prelude::*;
//!
//! let (tx, rx) = mpsc::channel();
//!
//! TaskRunner::new(|| Ok(Some("done")))
//!     .with_result_handler(move |value| {
//!         let _ = tx.send(value);
//!     })
//!     .start();
//!
//! assert_eq!(rx.recv().unwrap(), "done");
//! ```
//!
//! Panics are reported like any other error:
//!
//! ```
//! use std::sync::mpsc;
//! use taskguard::prelude::*;
//!
//! let (tx, rx) = mpsc::channel();
//!
//! run_with_error_handler(
//!     || -> Outcome { panic!("boom") },
//!     move |err| {
//!         let _ = tx.send(err.to_string());
//!     },
//! );
//!
//! assert!(rx.recv().unwrap().contains("boom"));
//! ```
//!
//! There is no pool, queue, cancellation or join handle. Callers that need to
//! know when a task is done signal it from their handlers.

#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod executor;
pub mod prelude;
pub mod spawn;

// Re-export key types at crate root
pub use config::{Config, ConfigBuilder};
pub use error::{BoxError, Error, Result};
pub use executor::{
    default_error_handler, write_error, ErrorHandler, Outcome, PanicGuard, PanicReport,
    ResultHandler, TaskId, TaskRunner,
};
pub use spawn::{run, run_with_error_handler, run_with_result_handler};
