//! Helpers for waiting on task threads from tests.

#![allow(dead_code)]

use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::fmt::Debug;
use std::time::Duration;

pub const WAIT: Duration = Duration::from_secs(5);

/// Wait for the next value a handler sent.
pub fn expect_one<T: Debug>(rx: &Receiver<T>) -> T {
    match rx.recv_timeout(WAIT) {
        Ok(value) => value,
        Err(e) => panic!("handler was not invoked: {:?}", e),
    }
}

/// Wait until every sender is gone, failing if anything arrives first.
///
/// Handlers own their senders, so this returns once the task thread has
/// finished and dropped them.
pub fn expect_silence<T: Debug>(rx: &Receiver<T>) {
    match rx.recv_timeout(WAIT) {
        Err(RecvTimeoutError::Disconnected) => {}
        Ok(value) => panic!("handler was invoked unexpectedly with {:?}", value),
        Err(RecvTimeoutError::Timeout) => panic!("task thread did not finish"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailed(pub &'static str);

impl std::fmt::Display for TaskFailed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for TaskFailed {}
