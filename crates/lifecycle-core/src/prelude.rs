pub use crate::callback::{
    Callback, CallbackMap, Evaluator, SLOT_PREFIX, callback, callback_with_cleanup,
};
pub use crate::cleanup::{Cleanup, Teardown, on_cleanup};
pub use crate::composer::{Ancestor, Composer};
pub use crate::error::LifecycleError;
pub use crate::host::ComponentHost;
pub use crate::lifecycle::{Lifecycle, Phase};
pub use crate::scope::{Scope, current_scope, on_dispose};
pub use crate::view::{LifecycleView, use_lifecycle};
