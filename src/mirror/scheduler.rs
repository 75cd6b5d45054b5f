//! Display-refresh scheduling.

use std::cell::RefCell;
use std::rc::Rc;

/// Identifies one requested tick, so it can be cancelled or matched when
/// it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Requests "run me again at the next refresh", one tick at a time.
pub trait Scheduler {
    fn request_tick(&mut self) -> TickHandle;

    /// Withdraw a request. Unknown or already-fired handles are ignored.
    fn cancel_tick(&mut self, handle: TickHandle);
}

#[derive(Debug, Default)]
struct RefreshState {
    next_id: u64,
    pending: Option<TickHandle>,
}

/// Single-threaded scheduler shared between the render loop and the
/// driver that owns the refresh timer.
///
/// The render loop requests ticks through [`Scheduler`]; the driver calls
/// [`RefreshScheduler::take_due`] on every refresh and fires whatever is
/// pending. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct RefreshScheduler {
    inner: Rc<RefCell<RefreshState>>,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending tick, if any, for the driver to fire.
    pub fn take_due(&self) -> Option<TickHandle> {
        self.inner.borrow_mut().pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.inner.borrow().pending.is_some()
    }
}

impl Scheduler for RefreshScheduler {
    fn request_tick(&mut self) -> TickHandle {
        let mut state = self.inner.borrow_mut();
        state.next_id += 1;
        let handle = TickHandle(state.next_id);
        state.pending = Some(handle);
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        let mut state = self.inner.borrow_mut();
        if state.pending == Some(handle) {
            state.pending = None;
        }
    }
}
