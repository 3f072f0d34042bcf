use std::collections::BTreeMap;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::cleanup::{Cleanup, Teardown};

/// Names of lifecycle slots start with this prefix (`onMount`, `onRender`, ...).
pub const SLOT_PREFIX: &str = "on";

/// A lifecycle callback. Identity is the identity of the shared function.
pub type Callback<E> = Rc<dyn Fn(&E) -> Option<Teardown<E>>>;

/// Composite function built for a slot from its local and inherited callbacks.
pub type Evaluator<E> = Rc<dyn Fn(&E) -> Cleanup<E>>;

/// Inherited callbacks, oldest ancestor first.
pub type Inherited<E> = SmallVec<[Callback<E>; 4]>;

/// Plain name -> callback mapping, the "leaf" form of an ancestor.
pub type CallbackMap<E> = BTreeMap<String, Callback<E>>;

/// Wraps a closure that never hands back a teardown.
pub fn callback<E: 'static>(f: impl Fn(&E) + 'static) -> Callback<E> {
    Rc::new(move |arg: &E| -> Option<Teardown<E>> {
        f(arg);
        None
    })
}

/// Wraps a closure that may return a teardown (see [`crate::on_cleanup`]).
pub fn callback_with_cleanup<E: 'static>(
    f: impl Fn(&E) -> Option<Teardown<E>> + 'static,
) -> Callback<E> {
    Rc::new(f)
}

pub fn is_slot_name(name: &str) -> bool {
    name.starts_with(SLOT_PREFIX)
}

/// Element-wise identity comparison of two callback sequences.
pub(crate) fn same_callbacks<E>(a: &[Callback<E>], b: &[Callback<E>]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Rc::ptr_eq(x, y))
}
