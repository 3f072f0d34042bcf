use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};

use crate::callback::{Callback, CallbackMap, Evaluator, Inherited, is_slot_name, same_callbacks};
use crate::cleanup::Cleanup;
use crate::error::LifecycleError;
use crate::lifecycle::Lifecycle;
use crate::slot::CallbackSlot;

/// Where inherited callbacks come from.
///
/// A `Composer` ancestor chains transitively: the child inherits the
/// ancestor's own inherited callbacks plus its local one. The mapping forms
/// are leaves and contribute exactly one callback per name.
pub enum Ancestor<'a, E: 'static> {
    Composer(&'a Composer<E>),
    Callbacks(&'a CallbackMap<E>),
    Declared(&'a Lifecycle<E>),
}

impl<E: Clone + 'static> Ancestor<'_, E> {
    fn sequences(&self) -> BTreeMap<String, Inherited<E>> {
        match self {
            Ancestor::Composer(composer) => composer
                .visible_slots()
                .map(|(name, slot)| (name.clone(), slot.lineage()))
                .collect(),
            Ancestor::Callbacks(map) => map
                .iter()
                .map(|(name, cb)| (name.clone(), Inherited::from_elem(cb.clone(), 1)))
                .collect(),
            Ancestor::Declared(lifecycle) => lifecycle
                .entries()
                .map(|(name, cb)| (name.to_string(), Inherited::from_elem(cb.clone(), 1)))
                .collect(),
        }
    }
}

impl<'a, E: 'static> From<&'a Composer<E>> for Ancestor<'a, E> {
    fn from(c: &'a Composer<E>) -> Self {
        Ancestor::Composer(c)
    }
}

impl<'a, E: 'static> From<&'a CallbackMap<E>> for Ancestor<'a, E> {
    fn from(m: &'a CallbackMap<E>) -> Self {
        Ancestor::Callbacks(m)
    }
}

impl<'a, E: 'static> From<&'a Lifecycle<E>> for Ancestor<'a, E> {
    fn from(l: &'a Lifecycle<E>) -> Self {
        Ancestor::Declared(l)
    }
}

/// Registry of callback slots for one component instance.
pub struct Composer<E: 'static> {
    slots: BTreeMap<String, CallbackSlot<E>>,
}

impl<E: Clone + 'static> Composer<E> {
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }

    /// Creates (or replaces) a slot with no inherited callbacks and no evaluator.
    pub fn init(
        &mut self,
        name: impl Into<String>,
        initial: Option<Callback<E>>,
    ) -> &mut CallbackSlot<E> {
        let slot = self
            .slots
            .entry(name.into())
            .or_insert_with(|| CallbackSlot::new(None));
        *slot = CallbackSlot::new(initial);
        slot
    }

    /// Reconciles inherited callbacks against `ancestor`.
    pub fn inherit<'a>(&mut self, ancestor: impl Into<Ancestor<'a, E>>) {
        let incoming = ancestor.into().sequences();
        let mut dirty = BTreeSet::new();

        for (name, seq) in incoming.iter() {
            if !is_slot_name(name) {
                log::debug!("inherit: ignoring non-slot name '{name}'");
                continue;
            }
            let slot = self.slots.entry(name.clone()).or_insert_with(|| {
                dirty.insert(name.clone());
                CallbackSlot::new(None)
            });
            if !same_callbacks(slot.inherited(), seq) {
                log::debug!(
                    "inherit: '{name}' now chains {} inherited callback(s)",
                    seq.len()
                );
                slot.set_inherited(seq.clone());
                dirty.insert(name.clone());
            }
        }

        for (name, slot) in self.slots.iter_mut() {
            if incoming.contains_key(name) || !is_slot_name(name) {
                continue;
            }
            if !slot.inherited().is_empty() || slot.evaluator().is_none() {
                log::debug!("inherit: '{name}' no longer inherited; local only");
                slot.set_inherited(Inherited::new());
                dirty.insert(name.clone());
            }
        }

        for name in dirty {
            if let Some(slot) = self.slots.get_mut(&name) {
                slot.rebuild(&name);
            }
        }
    }

    pub fn rebuild_evaluator(&mut self, name: &str) -> Result<(), LifecycleError> {
        let slot = self
            .slots
            .get_mut(name)
            .ok_or_else(|| LifecycleError::UnknownSlot {
                name: name.to_string(),
            })?;
        slot.rebuild(name);
        Ok(())
    }

    /// Current evaluator for a slot; `None` for non-slot names.
    pub fn get(&self, name: &str) -> Option<Evaluator<E>> {
        self.slot(name).and_then(|s| s.evaluator().cloned())
    }

    /// Assigns the local callback for `name`, creating the slot if needed.
    pub fn set(&mut self, name: &str, cb: Callback<E>) -> Result<(), LifecycleError> {
        if !is_slot_name(name) {
            log::warn!("rejected write to non-slot name '{name}'");
            return Err(LifecycleError::InvalidSlotName {
                name: name.to_string(),
            });
        }
        self.assign(name, cb);
        Ok(())
    }

    /// Type-erased write. Anything other than a [`Callback<E>`] is rejected and
    /// the slot keeps its previous content.
    pub fn set_value(&mut self, name: &str, value: Box<dyn Any>) -> Result<(), LifecycleError> {
        match value.downcast::<Callback<E>>() {
            Ok(cb) => self.set(name, *cb),
            Err(_) => {
                log::warn!("rejected non-callback write to '{name}'");
                Err(LifecycleError::NotCallable {
                    name: name.to_string(),
                })
            }
        }
    }

    pub(crate) fn assign(&mut self, name: &str, cb: Callback<E>) {
        match self.slots.get_mut(name) {
            Some(slot) => {
                slot.set_local(cb);
                slot.rebuild(name);
            }
            None => {
                let mut slot = CallbackSlot::new(Some(cb));
                slot.rebuild(name);
                self.slots.insert(name.to_string(), slot);
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.slots.remove(name).is_some()
    }

    pub fn keys(&self) -> Vec<String> {
        self.visible_slots().map(|(name, _)| name.clone()).collect()
    }

    pub fn has(&self, name: &str) -> bool {
        is_slot_name(name) && self.slots.contains_key(name)
    }

    /// Direct access to a slot's record, used by descendants when inheriting.
    pub fn slot(&self, name: &str) -> Option<&CallbackSlot<E>> {
        if !is_slot_name(name) {
            return None;
        }
        self.slots.get(name)
    }

    /// Runs the slot's evaluator, or does nothing if there isn't one.
    pub fn invoke(&self, name: &str, arg: &E) -> Cleanup<E> {
        match self.get(name) {
            Some(evaluator) => evaluator(arg),
            None => Cleanup::noop(),
        }
    }

    fn visible_slots(&self) -> impl Iterator<Item = (&String, &CallbackSlot<E>)> {
        self.slots.iter().filter(|(name, _)| is_slot_name(name))
    }
}

impl<E: Clone + 'static> Default for Composer<E> {
    fn default() -> Self {
        Self::new()
    }
}
