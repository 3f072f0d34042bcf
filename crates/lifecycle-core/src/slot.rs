use std::rc::Rc;

use crate::callback::{Callback, Evaluator, Inherited};
use crate::cleanup::{Cleanup, Teardowns};

/// Per-name record kept by a [`crate::Composer`].
pub struct CallbackSlot<E: 'static> {
    local: Option<Callback<E>>,
    inherited: Inherited<E>,
    evaluator: Option<Evaluator<E>>,
}

impl<E: Clone + 'static> CallbackSlot<E> {
    pub(crate) fn new(local: Option<Callback<E>>) -> Self {
        Self {
            local,
            inherited: Inherited::new(),
            evaluator: None,
        }
    }

    pub fn local(&self) -> Option<&Callback<E>> {
        self.local.as_ref()
    }

    pub fn inherited(&self) -> &[Callback<E>] {
        &self.inherited
    }

    pub fn evaluator(&self) -> Option<&Evaluator<E>> {
        self.evaluator.as_ref()
    }

    /// What a descendant inherits from this slot: our own lineage, then us.
    pub(crate) fn lineage(&self) -> Inherited<E> {
        let mut out = self.inherited.clone();
        if let Some(local) = &self.local {
            out.push(local.clone());
        }
        out
    }

    pub(crate) fn set_local(&mut self, local: Callback<E>) {
        self.local = Some(local);
    }

    pub(crate) fn set_inherited(&mut self, inherited: Inherited<E>) {
        self.inherited = inherited;
    }

    pub(crate) fn rebuild(&mut self, name: &str) {
        self.evaluator = Some(build_evaluator(
            Rc::from(name),
            self.local.clone(),
            self.inherited.clone(),
        ));
    }
}

/// Local first, then inherited from nearest ancestor to farthest.
fn build_evaluator<E: Clone + 'static>(
    name: Rc<str>,
    local: Option<Callback<E>>,
    inherited: Inherited<E>,
) -> Evaluator<E> {
    Rc::new(move |arg: &E| {
        log::trace!(
            "{name}: running {} callback(s)",
            usize::from(local.is_some()) + inherited.len()
        );
        let mut teardowns = Teardowns::new();
        for cb in local.iter().chain(inherited.iter().rev()) {
            if let Some(teardown) = cb(arg) {
                teardowns.push(teardown);
            }
        }
        Cleanup::new(arg.clone(), teardowns)
    })
}
