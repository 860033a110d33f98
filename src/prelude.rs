pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::{BoxError, Error, Result};
pub use crate::executor::{Outcome, PanicReport, TaskRunner};
pub use crate::spawn::{run, run_with_error_handler, run_with_result_handler};
