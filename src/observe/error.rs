//! Registration errors for observer watches.

use thiserror::Error;

/// Errors returned when registering a watch.
///
/// Both are caller bugs surfaced synchronously at registration time, before
/// any subscription is attached. Nothing is raised during notification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WatchError {
    #[error("Watch has no action kind and no predicate. Call .when(predicate) or start from Watch::action(kind)")]
    MissingPredicate,

    #[error("Watch has no handler. Call .run(handler) before registering")]
    MissingHandler,
}
