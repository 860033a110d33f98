use crate::executor::panic_handler::PanicReport;

pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error type returned by a unit of work.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The work returned `Err`.
    #[error("{0}")]
    Task(#[source] BoxError),

    /// The work panicked and the panic was recovered on the task thread.
    #[error("panic recovered: {0}")]
    Panic(PanicReport),

    #[error("failed to spawn task thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub fn is_panic(&self) -> bool {
        matches!(self, Error::Panic(_))
    }

    pub fn panic_report(&self) -> Option<&PanicReport> {
        match self {
            Error::Panic(report) => Some(report),
            _ => None,
        }
    }

    /// Downcast the error returned by the work to its concrete type.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Error::Task(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Take back the error returned by the work, if that is what this is.
    pub fn into_task_error(self) -> Option<BoxError> {
        match self {
            Error::Task(inner) => Some(inner),
            _ => None,
        }
    }
}
