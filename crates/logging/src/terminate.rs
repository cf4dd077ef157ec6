//! crates/logging/src/terminate.rs
//! Process termination used by the fatal path.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Exit status used after a fatal message.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Ends the program after a fatal message has been reported.
///
/// Loggers call this exactly once per fatal emission and never regain
/// control. Production code uses [`ProcessExit`]; tests inject
/// [`UnwindingTerminator`] to observe the fatal path without ending the
/// test process.
pub trait Terminate: Send + Sync {
    /// Terminates with `code`. Must not return.
    fn terminate(&self, code: i32) -> !;
}

/// Terminates the process through [`std::process::exit`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ProcessExit;

impl Terminate for ProcessExit {
    fn terminate(&self, code: i32) -> ! {
        std::process::exit(code)
    }
}

/// Panic payload raised by [`UnwindingTerminator`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Terminated {
    /// Exit status the logger asked for.
    pub code: i32,
}

/// Terminator that records the requested status and unwinds instead of exiting.
///
/// The unwind carries a [`Terminated`] payload; [`catch_termination`] turns it
/// back into a value.
#[derive(Debug, Default)]
pub struct UnwindingTerminator {
    calls: AtomicUsize,
    last_code: Mutex<Option<i32>>,
}

impl UnwindingTerminator {
    /// Creates a terminator that has not been triggered yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times [`terminate`](Terminate::terminate) ran.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Status passed to the most recent termination.
    pub fn last_code(&self) -> Option<i32> {
        *self
            .last_code
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Terminate for UnwindingTerminator {
    fn terminate(&self, code: i32) -> ! {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_code
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(code);
        panic::panic_any(Terminated { code })
    }
}

/// Runs `f`, returning the [`Terminated`] payload if it unwound through an
/// [`UnwindingTerminator`].
///
/// Returns `None` when `f` completes normally. Any other panic is resumed.
pub fn catch_termination<F>(f: F) -> Option<Terminated>
where
    F: FnOnce(),
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(()) => None,
        Err(payload) => match payload.downcast::<Terminated>() {
            Ok(terminated) => Some(*terminated),
            Err(other) => panic::resume_unwind(other),
        },
    }
}
