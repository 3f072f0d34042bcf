use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

/// One-shot teardown returned by a single lifecycle callback.
pub struct Teardown<E>(Box<dyn FnOnce(&E)>);

impl<E> Teardown<E> {
    pub fn new(f: impl FnOnce(&E) + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn run(self, arg: &E) {
        (self.0)(arg)
    }
}

/// Helper to return a teardown from inside a callback.
pub fn on_cleanup<E>(f: impl FnOnce(&E) + 'static) -> Option<Teardown<E>> {
    Some(Teardown::new(f))
}

pub(crate) type Teardowns<E> = SmallVec<[Teardown<E>; 4]>;

struct Pending<E> {
    arg: E,
    teardowns: Teardowns<E>,
}

/// Composite cleanup produced by an evaluator.
///
/// Holds the argument the evaluator ran with and every teardown the
/// callbacks handed back. Running it pops teardowns from the end, so the
/// last callback to return one is torn down first.
pub struct Cleanup<E: 'static>(Rc<RefCell<Option<Pending<E>>>>);

impl<E: 'static> Cleanup<E> {
    pub(crate) fn new(arg: E, teardowns: Teardowns<E>) -> Self {
        if teardowns.is_empty() {
            return Self::noop();
        }
        Self(Rc::new(RefCell::new(Some(Pending { arg, teardowns }))))
    }

    pub fn noop() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    /// Number of teardowns still waiting to run.
    pub fn pending(&self) -> usize {
        self.0
            .borrow()
            .as_ref()
            .map_or(0, |p| p.teardowns.len())
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        let taken = self.0.borrow_mut().take();
        if let Some(mut pending) = taken {
            while let Some(teardown) = pending.teardowns.pop() {
                teardown.run(&pending.arg);
            }
        }
    }
}

impl<E: 'static> Clone for Cleanup<E> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<E: 'static> Default for Cleanup<E> {
    fn default() -> Self {
        Self::noop()
    }
}

impl<E: 'static> std::fmt::Debug for Cleanup<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cleanup")
            .field("pending", &self.pending())
            .finish()
    }
}
