//! Panic capture for task threads.
//!
//! A process-wide panic hook is chained in front of whatever hook was
//! installed before it. While a thread is inside [`PanicGuard::execute`] the
//! hook records the panic location and a stack trace taken at the panic site
//! instead of printing the usual "thread panicked" message. Threads that are
//! not guarded fall through to the previous hook untouched.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::{self, catch_unwind, AssertUnwindSafe};
use std::sync::Once;

static HOOK: Once = Once::new();

thread_local! {
    static GUARD_DEPTH: Cell<usize> = const { Cell::new(0) };
    static CAPTURE_BACKTRACE: Cell<bool> = const { Cell::new(true) };
    static CAPTURED: RefCell<Option<PanicSite>> = const { RefCell::new(None) };
}

struct PanicSite {
    location: Option<String>,
    backtrace: Option<String>,
}

fn install_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if GUARD_DEPTH.with(Cell::get) == 0 {
                previous(info);
                return;
            }

            let backtrace = CAPTURE_BACKTRACE
                .with(Cell::get)
                .then(|| Backtrace::force_capture().to_string());
            let site = PanicSite {
                location: info.location().map(|l| l.to_string()),
                backtrace,
            };
            CAPTURED.with(|slot| *slot.borrow_mut() = Some(site));
        }));
    });
}

/// Marks the current thread as guarded for as long as it lives.
struct Scope {
    saved_capture: bool,
}

impl Scope {
    fn enter(capture_backtrace: bool) -> Self {
        GUARD_DEPTH.with(|d| d.set(d.get() + 1));
        let saved_capture = CAPTURE_BACKTRACE.with(|c| c.replace(capture_backtrace));
        CAPTURED.with(|slot| slot.borrow_mut().take());
        Self { saved_capture }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        CAPTURE_BACKTRACE.with(|c| c.set(self.saved_capture));
        GUARD_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// Runs closures and turns any panic they raise into a [`PanicReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanicGuard {
    capture_backtrace: bool,
}

impl PanicGuard {
    pub fn new(capture_backtrace: bool) -> Self {
        Self { capture_backtrace }
    }

    pub fn execute<F, R>(&self, f: F) -> Result<R, PanicReport>
    where
        F: FnOnce() -> R,
    {
        install_hook();
        let scope = Scope::enter(self.capture_backtrace);

        let result = catch_unwind(AssertUnwindSafe(f));
        drop(scope);

        result.map_err(|payload| {
            let site = CAPTURED.with(|slot| slot.borrow_mut().take());
            PanicReport::new(payload.as_ref(), site, self.capture_backtrace)
        })
    }

    pub fn captures_backtrace(&self) -> bool {
        self.capture_backtrace
    }
}

impl Default for PanicGuard {
    fn default() -> Self {
        Self::new(true)
    }
}

/// A recovered panic: payload text, where it happened, and the stack at that point.
#[derive(Debug, Clone)]
pub struct PanicReport {
    message: String,
    location: Option<String>,
    backtrace: Option<String>,
}

impl PanicReport {
    fn new(payload: &(dyn Any + Send), site: Option<PanicSite>, capture_backtrace: bool) -> Self {
        let message = payload_message(payload);

        match site {
            Some(site) => Self {
                message,
                location: site.location,
                backtrace: site.backtrace,
            },
            // someone replaced our hook, so all we have is the unwind point
            None => Self {
                message,
                location: None,
                backtrace: capture_backtrace.then(|| Backtrace::force_capture().to_string()),
            },
        }
    }

    /// The panic payload rendered as text.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn backtrace(&self) -> Option<&str> {
        self.backtrace.as_deref()
    }
}

impl fmt::Display for PanicReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(location) = &self.location {
            write!(f, " at {}", location)?;
        }
        match &self.backtrace {
            Some(backtrace) => write!(f, "\nstack trace:\n{}", backtrace),
            None => f.write_str("\nstack trace: <backtrace disabled>"),
        }
    }
}

fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}
