//! # Lifecycle callbacks that chain onto a parent's
//!
//! A component usually gets `onMount` / `onRender` / `onUnmount` callbacks
//! from whoever renders it, and wants to add its own without replacing
//! them. This crate keeps one [`Composer`] per component instance that
//! merges both:
//!
//! - local callbacks are assigned with `set` (or `set_on_mount`, ...);
//! - inherited callbacks come from the parent through `inherit` / `sync`;
//! - reading a slot gives an evaluator that runs the local callback first,
//!   then the inherited ones from nearest ancestor to farthest.
//!
//! ```rust
//! use lifecycle_core::*;
//!
//! let parent = Lifecycle::new()
//!     .with_on_mount(callback(|el: &&str| log::info!("[App] mounted {el}")));
//!
//! let view = use_lifecycle(Some(&parent));
//! view.set_on_mount(callback(|el: &&str| log::info!("[Cool] mounted {el}")));
//!
//! // "[Cool] mounted div" then "[App] mounted div"
//! let cleanup = view.run(Phase::Mount, &"div");
//! cleanup.run();
//! ```
//!
//! ## Cleanups
//!
//! A callback may hand back a teardown with [`on_cleanup`]. The evaluator
//! collects them and returns a [`Cleanup`]; running it calls the teardowns
//! with the same argument, last one first:
//!
//! ```rust
//! use lifecycle_core::*;
//!
//! let view = LifecycleView::<u32>::new();
//! view.set_on_mount(callback_with_cleanup(|id: &u32| {
//!     log::info!("subscribe {id}");
//!     on_cleanup(|id: &u32| log::info!("unsubscribe {id}"))
//! }));
//! view.run(Phase::Mount, &7).run();
//! ```
//!
//! ## Hosting
//!
//! [`ComponentHost`] drives the phases for one element and ties the
//! mount cleanup and `onUnmount` to its [`Scope`], so unmounting a parent
//! host tears its children down first.

pub mod callback;
pub mod cleanup;
pub mod composer;
pub mod error;
pub mod host;
pub mod lifecycle;
pub mod prelude;
pub mod scope;
pub mod slot;
pub mod tests;
pub mod view;

pub use callback::*;
pub use cleanup::*;
pub use composer::*;
pub use error::*;
pub use host::*;
pub use lifecycle::*;
pub use scope::*;
pub use slot::*;
pub use view::*;
