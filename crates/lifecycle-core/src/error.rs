#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("value written to `{name}` is not a lifecycle callback")]
    NotCallable { name: String },
    #[error("`{name}` is not a lifecycle slot name (expected an `on` prefix)")]
    InvalidSlotName { name: String },
    #[error("no callback slot named `{name}`")]
    UnknownSlot { name: String },
    #[error("component is already mounted")]
    AlreadyMounted,
    #[error("component is not mounted")]
    NotMounted,
}
