use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::callback::{Callback, Evaluator};
use crate::cleanup::Cleanup;
use crate::composer::{Ancestor, Composer};
use crate::error::LifecycleError;
use crate::lifecycle::{Lifecycle, Phase};

/// Shared, mutable handle over one component instance's [`Composer`].
///
/// Clones point at the same registry, so a child host can read evaluators
/// while the owning component keeps writing local callbacks into it.
/// Evaluators are cloned out before they run; callbacks are free to write
/// back into the view.
pub struct LifecycleView<E: 'static>(Rc<RefCell<Composer<E>>>);

impl<E: Clone + 'static> LifecycleView<E> {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Composer::new())))
    }

    /// Re-runs inheritance; call on every render of the owning component.
    pub fn sync<'a>(&self, ancestor: impl Into<Ancestor<'a, E>>) {
        self.0.borrow_mut().inherit(ancestor);
    }

    /// Inherits from another view (transitive chaining).
    pub fn sync_with_view(&self, parent: &LifecycleView<E>) {
        if Rc::ptr_eq(&self.0, &parent.0) {
            log::warn!("sync_with_view: a view cannot inherit from itself");
            return;
        }
        let parent = parent.0.borrow();
        self.0.borrow_mut().inherit(&*parent);
    }

    pub fn get(&self, name: &str) -> Option<Evaluator<E>> {
        self.0.borrow().get(name)
    }

    pub fn set(&self, name: &str, cb: Callback<E>) -> Result<(), LifecycleError> {
        self.0.borrow_mut().set(name, cb)
    }

    pub fn set_value(&self, name: &str, value: Box<dyn Any>) -> Result<(), LifecycleError> {
        self.0.borrow_mut().set_value(name, value)
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys()
    }

    pub fn has(&self, name: &str) -> bool {
        self.0.borrow().has(name)
    }

    pub fn invoke(&self, name: &str, arg: &E) -> Cleanup<E> {
        let evaluator = self.get(name);
        match evaluator {
            Some(evaluator) => evaluator(arg),
            None => Cleanup::noop(),
        }
    }

    pub fn phase(&self, phase: Phase) -> Option<Evaluator<E>> {
        self.get(phase.slot_name())
    }

    pub fn run(&self, phase: Phase, arg: &E) -> Cleanup<E> {
        self.invoke(phase.slot_name(), arg)
    }

    pub fn on_mount(&self) -> Option<Evaluator<E>> {
        self.phase(Phase::Mount)
    }

    pub fn on_render(&self) -> Option<Evaluator<E>> {
        self.phase(Phase::Render)
    }

    pub fn on_unmount(&self) -> Option<Evaluator<E>> {
        self.phase(Phase::Unmount)
    }

    pub fn set_phase(&self, phase: Phase, cb: Callback<E>) {
        self.0.borrow_mut().assign(phase.slot_name(), cb);
    }

    pub fn set_on_mount(&self, cb: Callback<E>) {
        self.set_phase(Phase::Mount, cb);
    }

    pub fn set_on_render(&self, cb: Callback<E>) {
        self.set_phase(Phase::Render, cb);
    }

    pub fn set_on_unmount(&self, cb: Callback<E>) {
        self.set_phase(Phase::Unmount, cb);
    }

    /// Read access to the underlying registry (slot records etc).
    pub fn with_composer<R>(&self, f: impl FnOnce(&Composer<E>) -> R) -> R {
        f(&self.0.borrow())
    }
}

impl<E: Clone + 'static> Default for LifecycleView<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> Clone for LifecycleView<E> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// Creates the callback view for a new component instance, already merged
/// with the lifecycle its parent declared.
///
/// Keep the returned view for the lifetime of the instance and call
/// [`LifecycleView::sync`] with the parent's lifecycle on later renders.
pub fn use_lifecycle<E: Clone + 'static>(parent: Option<&Lifecycle<E>>) -> LifecycleView<E> {
    let view = LifecycleView::new();
    if let Some(lifecycle) = parent {
        view.sync(lifecycle);
    }
    view
}
