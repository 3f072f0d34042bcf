use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::cleanup::Cleanup;
use crate::error::LifecycleError;
use crate::lifecycle::Phase;
use crate::scope::Scope;
use crate::view::LifecycleView;

struct HostState<E: 'static> {
    mounted: Cell<bool>,
    render_cleanup: RefCell<Option<Cleanup<E>>>,
}

/// Drives mount, render and unmount for one component instance.
///
/// Phases only run when asked; ordering beyond "mounted before render or
/// unmount" is up to the caller. Callbacks run with the host's [`Scope`]
/// installed, so they can register extra teardown with
/// [`crate::on_dispose`].
pub struct ComponentHost<E: Clone + 'static> {
    element: E,
    lifecycle: LifecycleView<E>,
    scope: Scope,
    state: Rc<HostState<E>>,
}

impl<E: Clone + 'static> ComponentHost<E> {
    pub fn new(element: E, lifecycle: LifecycleView<E>) -> Self {
        Self::with_scope(element, lifecycle, Scope::new())
    }

    fn with_scope(element: E, lifecycle: LifecycleView<E>, scope: Scope) -> Self {
        Self {
            element,
            lifecycle,
            scope,
            state: Rc::new(HostState {
                mounted: Cell::new(false),
                render_cleanup: RefCell::new(None),
            }),
        }
    }

    /// A host whose teardown runs before ours when we unmount.
    pub fn child(&self, element: E, lifecycle: LifecycleView<E>) -> Self {
        Self::with_scope(element, lifecycle, self.scope.child())
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn lifecycle(&self) -> &LifecycleView<E> {
        &self.lifecycle
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn is_mounted(&self) -> bool {
        self.state.mounted.get()
    }

    pub fn mount(&self) -> Result<(), LifecycleError> {
        if self.is_mounted() {
            return Err(LifecycleError::AlreadyMounted);
        }
        log::debug!("host: mount");
        let mount_cleanup = self
            .scope
            .run(|| self.lifecycle.run(Phase::Mount, &self.element));
        self.state.mounted.set(true);

        let state = self.state.clone();
        let lifecycle = self.lifecycle.clone();
        let element = self.element.clone();
        self.scope.add_disposer(move || {
            log::debug!("host: unmount");
            state.mounted.set(false);
            let render_cleanup = state.render_cleanup.borrow_mut().take();
            if let Some(cleanup) = render_cleanup {
                cleanup.run();
            }
            mount_cleanup.run();
            // read at teardown: the owner may have replaced onUnmount since mount
            lifecycle.run(Phase::Unmount, &element).run();
        });
        Ok(())
    }

    /// Runs the previous render's cleanup, then `onRender`.
    pub fn render(&self) -> Result<(), LifecycleError> {
        if !self.is_mounted() {
            return Err(LifecycleError::NotMounted);
        }
        let previous = self.state.render_cleanup.borrow_mut().take();
        if let Some(cleanup) = previous {
            cleanup.run();
        }
        log::trace!("host: render");
        let cleanup = self
            .scope
            .run(|| self.lifecycle.run(Phase::Render, &self.element));
        *self.state.render_cleanup.borrow_mut() = Some(cleanup);
        Ok(())
    }

    pub fn unmount(&self) -> Result<(), LifecycleError> {
        if !self.is_mounted() {
            return Err(LifecycleError::NotMounted);
        }
        self.scope.clone().dispose();
        Ok(())
    }
}

impl<E: Clone + 'static> Drop for ComponentHost<E> {
    fn drop(&mut self) {
        if self.is_mounted() {
            let _ = self.unmount();
        }
    }
}
