//! Cancellation handles for container subscriptions.

use std::fmt;
use std::rc::Rc;

/// Handle for detaching a listener from a container.
///
/// Returned by [`Container::subscribe`](super::Container::subscribe) and by
/// observer registration. Cancelling is idempotent: the first call detaches
/// the listener, later calls are no-ops. Dropping the handle does *not*
/// detach the listener; cancellation is always explicit.
///
/// # Example
///
/// ```rust
/// use statewatch::core::Action;
/// use statewatch::store::Store;
///
/// #[derive(Clone, Debug)]
/// struct Tick;
///
/// impl Action for Tick {
///     fn kind(&self) -> &'static str {
///         "TICK"
///     }
/// }
///
/// let store: Store<u32, Tick> = Store::new(0, |count, _| count + 1);
/// let subscription = store.subscribe(|| {});
///
/// subscription.cancel();
/// subscription.cancel(); // no-op
/// ```
#[derive(Clone)]
pub struct Subscription {
    detach: Rc<dyn Fn()>,
}

impl Subscription {
    /// Create a subscription from a detach callback.
    ///
    /// Containers construct these; the callback must tolerate being invoked
    /// more than once.
    pub fn new(detach: impl Fn() + 'static) -> Self {
        Self {
            detach: Rc::new(detach),
        }
    }

    /// Detach the listener. Later calls are no-ops.
    pub fn cancel(&self) {
        (self.detach)();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
