use crate::callback::Callback;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Mount,
    Render,
    Unmount,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Mount, Phase::Render, Phase::Unmount];

    pub fn slot_name(self) -> &'static str {
        match self {
            Phase::Mount => "onMount",
            Phase::Render => "onRender",
            Phase::Unmount => "onUnmount",
        }
    }
}

/// Lifecycle callbacks a parent declares for a child.
///
/// Inheriting from a `Lifecycle` behaves like inheriting from a plain
/// mapping: each present field becomes the single inherited callback for
/// its slot, and empty fields count as absent.
pub struct Lifecycle<E: 'static> {
    pub on_mount: Option<Callback<E>>,
    pub on_render: Option<Callback<E>>,
    pub on_unmount: Option<Callback<E>>,
}

impl<E: 'static> Lifecycle<E> {
    pub fn new() -> Self {
        Self {
            on_mount: None,
            on_render: None,
            on_unmount: None,
        }
    }

    pub fn with_on_mount(mut self, cb: Callback<E>) -> Self {
        self.on_mount = Some(cb);
        self
    }

    pub fn with_on_render(mut self, cb: Callback<E>) -> Self {
        self.on_render = Some(cb);
        self
    }

    pub fn with_on_unmount(mut self, cb: Callback<E>) -> Self {
        self.on_unmount = Some(cb);
        self
    }

    pub fn get(&self, phase: Phase) -> Option<&Callback<E>> {
        match phase {
            Phase::Mount => self.on_mount.as_ref(),
            Phase::Render => self.on_render.as_ref(),
            Phase::Unmount => self.on_unmount.as_ref(),
        }
    }

    /// Present callbacks keyed by slot name.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &Callback<E>)> {
        Phase::ALL
            .into_iter()
            .filter_map(|phase| self.get(phase).map(|cb| (phase.slot_name(), cb)))
    }
}

impl<E: 'static> Default for Lifecycle<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> Clone for Lifecycle<E> {
    fn clone(&self) -> Self {
        Self {
            on_mount: self.on_mount.clone(),
            on_render: self.on_render.clone(),
            on_unmount: self.on_unmount.clone(),
        }
    }
}
