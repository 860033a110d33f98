use crate::error::{Error, Result};
use crate::executor::task::TaskId;
use std::thread;

/// Smallest stack size accepted for a task thread.
pub const MIN_STACK_SIZE: usize = 16 * 1024;

/// Settings for the thread each task is launched on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Task threads are named `{prefix}-{task id}`. An empty prefix leaves them unnamed.
    pub thread_name_prefix: String,
    /// `None` uses the platform default.
    pub stack_size: Option<usize>,
    /// Capture a stack trace when the work panics.
    pub capture_backtrace: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thread_name_prefix: "taskguard".to_string(),
            stack_size: None,
            capture_backtrace: true,
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<()> {
        if self.thread_name_prefix.contains('\0') {
            return Err(Error::config("thread_name_prefix must not contain NUL bytes"));
        }

        if let Some(size) = self.stack_size {
            if size < MIN_STACK_SIZE {
                return Err(Error::config(format!(
                    "stack_size must be at least {} bytes",
                    MIN_STACK_SIZE
                )));
            }
        }

        Ok(())
    }

    pub(crate) fn thread_builder(&self, id: TaskId) -> thread::Builder {
        let mut builder = thread::Builder::new();

        // thread::Builder::name panics on interior NUL, so an invalid prefix is skipped
        if !self.thread_name_prefix.is_empty() && !self.thread_name_prefix.contains('\0') {
            builder = builder.name(format!("{}-{}", self.thread_name_prefix, id.as_u64()));
        }

        if let Some(stack_size) = self.stack_size {
            builder = builder.stack_size(stack_size);
        }

        builder
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.config.thread_name_prefix = prefix.into();
        self
    }

    pub fn stack_size(mut self, size: usize) -> Self {
        self.config.stack_size = Some(size);
        self
    }

    pub fn capture_backtrace(mut self, capture: bool) -> Self {
        self.config.capture_backtrace = capture;
        self
    }

    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.thread_name_prefix, "taskguard");
        assert!(config.capture_backtrace);
        assert_eq!(config.stack_size, None);
    }

    #[test]
    fn test_builder() {
        let config = Config::builder()
            .thread_name_prefix("loader")
            .stack_size(256 * 1024)
            .capture_backtrace(false)
            .build()
            .unwrap();

        assert_eq!(config.thread_name_prefix, "loader");
        assert_eq!(config.stack_size, Some(256 * 1024));
        assert!(!config.capture_backtrace);
    }

    #[test]
    fn test_rejects_small_stack() {
        let result = Config::builder().stack_size(1024).build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_nul_in_prefix() {
        let result = Config::builder().thread_name_prefix("bad\0name").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_thread_builder_names_thread() {
        let config = Config::builder().thread_name_prefix("named").build().unwrap();
        let id = TaskId::next();

        let name = config
            .thread_builder(id)
            .spawn(|| thread::current().name().map(str::to_owned))
            .unwrap()
            .join()
            .unwrap();

        assert_eq!(name, Some(format!("named-{}", id.as_u64())));
    }

    #[test]
    fn test_empty_prefix_leaves_thread_unnamed() {
        let config = Config::builder().thread_name_prefix("").build().unwrap();

        let name = config
            .thread_builder(TaskId::next())
            .spawn(|| thread::current().name().map(str::to_owned))
            .unwrap()
            .join()
            .unwrap();

        assert_eq!(name, None);
    }
}
