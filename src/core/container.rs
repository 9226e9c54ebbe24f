//! The container seam the observation layer is generic over.

use super::action::Action;
use super::subscription::Subscription;

/// A unidirectional state container.
///
/// Holds an application state, accepts dispatched actions, and notifies
/// plain subscribers once per committed transition. Anything satisfying this
/// contract can be wrapped by
/// [`ObservedStore`](crate::observe::ObservedStore); the crate ships
/// [`Store`](crate::store::Store) as a minimal implementation.
///
/// # Contract
///
/// - `state` returns a snapshot of the current state.
/// - `subscribe` registers a listener called synchronously, exactly once per
///   committed transition, in registration order. The returned
///   [`Subscription`] detaches it; cancellation during a notification pass
///   takes effect for subsequent passes only.
/// - `dispatch` runs the transition and the full notification pass before
///   returning. A dispatch issued from inside a listener must not interleave
///   with the pass in progress; the container serializes or defers it.
///
/// Containers are cheap shared handles (`Clone` clones the handle, not the
/// state); observer callbacks capture them, so they must own their data.
pub trait Container: Clone + 'static {
    /// The application state held by this container.
    type State: Clone + 'static;

    /// The action type this container accepts.
    type Action: Action;

    /// Snapshot the current state.
    fn state(&self) -> Self::State;

    /// Register a listener called once per committed transition.
    fn subscribe(&self, listener: Box<dyn Fn()>) -> Subscription;

    /// Dispatch an action, running the reducer and the notification pass.
    fn dispatch(&self, action: Self::Action);
}
