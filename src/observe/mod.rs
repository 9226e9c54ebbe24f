//! Change observation over any container.
//!
//! This module is the core of the crate. [`ObservedStore`] wraps a
//! [`Container`] and adds two operations on top of the pass-through surface:
//! [`on`](ObservedStore::on) registers an observer described by a [`Watch`],
//! and [`once`](ObservedStore::once) registers a one-shot observer that
//! detaches itself after its first match.
//!
//! Each observer owns its own tracking record (previous snapshot, fired
//! flag) closed over by one low-level subscription; there is no central
//! registry. On every committed transition the observer reads the current
//! state, evaluates its match rule against its own previous snapshot and the
//! kind of the action that committed the transition, and advances the
//! snapshot whether or not it matched.

mod error;
mod watch;

pub use error::WatchError;
pub use watch::{Handler, Predicate, Watch};

use crate::core::{Action, Container, Subscription};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::{debug, trace};

/// A container augmented with change observation.
///
/// All container operations pass through to the wrapped container;
/// `dispatch` additionally records the action's kind before forwarding, so
/// kind-filtered observers can match against it during the notification pass
/// that dispatch triggers. A dispatch issued from inside a handler is
/// deferred and runs after the current pass, which keeps exactly one
/// recorded kind per pass.
///
/// Constructed with [`ObservedStore::new`] or via the [`Observe`] extension
/// trait. Dispatch through the observed store, not the wrapped container
/// directly: a dispatch that bypasses the interceptor commits a transition
/// with no recorded kind, and kind-filtered observers will not match it.
///
/// # Example
///
/// ```rust
/// use statewatch::core::Action;
/// use statewatch::observe::{Observe, Watch};
/// use statewatch::store::Store;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// #[derive(Clone, Debug)]
/// enum CounterAction {
///     Increment,
///     Reset,
/// }
///
/// impl Action for CounterAction {
///     fn kind(&self) -> &'static str {
///         match self {
///             Self::Increment => "INCREMENT",
///             Self::Reset => "RESET",
///         }
///     }
/// }
///
/// let store = Store::new(0u32, |count, action: &CounterAction| match action {
///     CounterAction::Increment => count + 1,
///     CounterAction::Reset => 0,
/// })
/// .observed();
///
/// let resets = Rc::new(Cell::new(0u32));
/// let seen = Rc::clone(&resets);
/// store
///     .on(Watch::action("RESET").run(move |_prev, _next| seen.set(seen.get() + 1)))
///     .unwrap();
///
/// store.dispatch(CounterAction::Increment);
/// store.dispatch(CounterAction::Reset);
/// assert_eq!(resets.get(), 1);
/// ```
pub struct ObservedStore<C: Container> {
    container: C,
    recent_kind: Rc<Cell<Option<&'static str>>>,
    dispatching: Rc<Cell<bool>>,
    deferred: Rc<RefCell<VecDeque<C::Action>>>,
}

impl<C: Container> Clone for ObservedStore<C> {
    fn clone(&self) -> Self {
        Self {
            container: self.container.clone(),
            recent_kind: Rc::clone(&self.recent_kind),
            dispatching: Rc::clone(&self.dispatching),
            deferred: Rc::clone(&self.deferred),
        }
    }
}

impl<C: Container> ObservedStore<C> {
    /// Wrap a container with change observation.
    pub fn new(container: C) -> Self {
        Self {
            container,
            recent_kind: Rc::new(Cell::new(None)),
            dispatching: Rc::new(Cell::new(false)),
            deferred: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Snapshot the current state. Pass-through.
    pub fn state(&self) -> C::State {
        self.container.state()
    }

    /// Register a plain listener on the wrapped container. Pass-through.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        self.container.subscribe(Box::new(listener))
    }

    /// Dispatch an action, recording its kind for the notification pass it
    /// triggers.
    ///
    /// Re-entrant dispatch (from inside a handler or listener) is deferred
    /// and runs after the current pass with its own recorded kind. The
    /// recorded kind is cleared once the queue drains; outside a pass there
    /// is no meaningful value.
    pub fn dispatch(&self, action: C::Action) {
        self.deferred.borrow_mut().push_back(action);
        if self.dispatching.get() {
            return;
        }

        self.dispatching.set(true);
        loop {
            let next = self.deferred.borrow_mut().pop_front();
            let Some(action) = next else {
                break;
            };
            self.recent_kind.set(Some(action.kind()));
            trace!(kind = action.kind(), "dispatching");
            self.container.dispatch(action);
        }
        self.recent_kind.set(None);
        self.dispatching.set(false);
    }

    /// Register an observer. Fires its handler on every matching transition
    /// until the returned [`Subscription`] is cancelled.
    ///
    /// # Errors
    ///
    /// [`WatchError::MissingHandler`] if the watch has no handler,
    /// [`WatchError::MissingPredicate`] if it has neither kind nor
    /// predicate. Both are returned before any subscription is attached.
    pub fn on(&self, watch: Watch<C::State>) -> Result<Subscription, WatchError> {
        self.register(watch, false)
    }

    /// Register a one-shot observer. Identical to [`on`](Self::on), except
    /// the observer detaches itself immediately after its first match,
    /// before its handler runs, so nothing the handler does (including
    /// further dispatches) can fire it again.
    pub fn once(&self, watch: Watch<C::State>) -> Result<Subscription, WatchError> {
        self.register(watch, true)
    }

    fn register(&self, watch: Watch<C::State>, once: bool) -> Result<Subscription, WatchError> {
        let Watch {
            kind,
            predicate,
            handler,
        } = watch;
        let handler = handler.ok_or(WatchError::MissingHandler)?;
        if kind.is_none() && predicate.is_none() {
            return Err(WatchError::MissingPredicate);
        }
        debug!(
            kind = kind.unwrap_or("<any>"),
            predicate = predicate.is_some(),
            once,
            "observer registered"
        );

        let container = self.container.clone();
        let recent = Rc::clone(&self.recent_kind);
        // Per-observer record, owned solely by this subscription's callback.
        let tracked = RefCell::new(container.state());
        let fired = Cell::new(false);
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let own = Rc::clone(&slot);

        let listener = move || {
            let state = container.state();
            let dispatched = recent.get();
            let is_match = {
                let previous = tracked.borrow();
                matched(kind, predicate.as_deref(), dispatched, &previous, &state)
            };

            if !is_match {
                // Unmatched transitions still advance the baseline; a later
                // match must diff against the state this observer last saw.
                *tracked.borrow_mut() = state;
                return;
            }

            if once {
                if fired.get() {
                    return;
                }
                if let Some(subscription) = own.borrow().as_ref() {
                    subscription.cancel();
                }
            }
            fired.set(true);
            let previous = tracked.replace(state.clone());
            trace!(kind = dispatched.unwrap_or("<none>"), once, "observer fired");
            handler(&previous, &state);
        };

        let subscription = self.container.subscribe(Box::new(listener));
        *slot.borrow_mut() = Some(subscription.clone());
        Ok(subscription)
    }
}

/// Match rule for one observer on one transition. The kind of the action
/// that committed the transition is threaded in explicitly; it is only
/// meaningful for the pass in progress.
fn matched<S>(
    kind: Option<&'static str>,
    predicate: Option<&dyn Fn(&S, &S) -> bool>,
    dispatched: Option<&'static str>,
    previous: &S,
    next: &S,
) -> bool {
    match kind {
        None => predicate.is_some_and(|p| p(previous, next)),
        Some(kind) => dispatched == Some(kind) && predicate.is_none_or(|p| p(previous, next)),
    }
}

impl<C: Container> Container for ObservedStore<C> {
    type State = C::State;
    type Action = C::Action;

    fn state(&self) -> C::State {
        ObservedStore::state(self)
    }

    fn subscribe(&self, listener: Box<dyn Fn()>) -> Subscription {
        ObservedStore::subscribe(self, listener)
    }

    fn dispatch(&self, action: C::Action) {
        ObservedStore::dispatch(self, action)
    }
}

/// Enhancer entry point: wraps any container with change observation.
///
/// Blanket-implemented for every [`Container`], so construction reads
/// `Store::new(..).observed()`.
pub trait Observe: Container + Sized {
    /// Wrap this container in an [`ObservedStore`].
    fn observed(self) -> ObservedStore<Self> {
        ObservedStore::new(self)
    }
}

impl<C: Container> Observe for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    #[derive(Clone, Debug)]
    enum CounterAction {
        Increment,
        Add(u32),
    }

    impl Action for CounterAction {
        fn kind(&self) -> &'static str {
            match self {
                Self::Increment => "INCREMENT",
                Self::Add(_) => "ADD",
            }
        }
    }

    fn observed_counter() -> ObservedStore<Store<u32, CounterAction>> {
        Store::new(0, |count: &u32, action: &CounterAction| match action {
            CounterAction::Increment => count + 1,
            CounterAction::Add(n) => count + n,
        })
        .observed()
    }

    #[test]
    fn rejects_watch_without_handler() {
        let store = observed_counter();
        let result = store.on(Watch::change(|prev: &u32, next: &u32| prev != next));
        assert_eq!(result.unwrap_err(), WatchError::MissingHandler);
    }

    #[test]
    fn rejects_watch_without_kind_or_predicate() {
        let store = observed_counter();
        let result = store.on(Watch::new().run(|_, _| {}));
        assert_eq!(result.unwrap_err(), WatchError::MissingPredicate);

        let result = store.once(Watch::new().run(|_, _| {}));
        assert_eq!(result.unwrap_err(), WatchError::MissingPredicate);
    }

    #[test]
    fn kind_only_watch_fires_on_each_matching_kind() {
        let store = observed_counter();
        let fires = Rc::new(Cell::new(0));

        let counter = Rc::clone(&fires);
        store
            .on(Watch::action("ADD").run(move |_, _| counter.set(counter.get() + 1)))
            .unwrap();

        store.dispatch(CounterAction::Increment);
        store.dispatch(CounterAction::Add(2));
        store.dispatch(CounterAction::Increment);
        store.dispatch(CounterAction::Add(3));
        assert_eq!(fires.get(), 2);
    }

    #[test]
    fn predicate_receives_observer_local_previous_state() {
        let store = observed_counter();
        let diffs = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&diffs);
        store
            .on(
                Watch::change(|prev: &u32, next: &u32| next > prev)
                    .run(move |prev, next| log.borrow_mut().push((*prev, *next))),
            )
            .unwrap();

        store.dispatch(CounterAction::Increment);
        store.dispatch(CounterAction::Add(4));
        assert_eq!(*diffs.borrow(), vec![(0, 1), (1, 5)]);
    }

    #[test]
    fn kind_and_predicate_both_gate_firing() {
        let store = observed_counter();
        let fires = Rc::new(Cell::new(0));

        let counter = Rc::clone(&fires);
        store
            .on(
                Watch::action_when("ADD", |_prev: &u32, next: &u32| *next >= 5)
                    .run(move |_, _| counter.set(counter.get() + 1)),
            )
            .unwrap();

        store.dispatch(CounterAction::Add(2)); // kind matches, predicate false
        store.dispatch(CounterAction::Add(3)); // state 5, both match
        store.dispatch(CounterAction::Increment); // kind mismatch
        assert_eq!(fires.get(), 1);
    }

    #[test]
    fn once_fires_a_single_time() {
        let store = observed_counter();
        let fires = Rc::new(Cell::new(0));

        let counter = Rc::clone(&fires);
        store
            .once(
                Watch::change(|prev: &u32, next: &u32| prev != next)
                    .run(move |_, _| counter.set(counter.get() + 1)),
            )
            .unwrap();

        store.dispatch(CounterAction::Increment);
        store.dispatch(CounterAction::Increment);
        store.dispatch(CounterAction::Add(7));
        assert_eq!(fires.get(), 1);
    }

    #[test]
    fn once_handler_dispatching_cannot_refire_itself() {
        let store = observed_counter();
        let fires = Rc::new(Cell::new(0));

        let counter = Rc::clone(&fires);
        let trigger = store.clone();
        store
            .once(
                Watch::change(|prev: &u32, next: &u32| prev != next).run(move |_, _| {
                    counter.set(counter.get() + 1);
                    trigger.dispatch(CounterAction::Increment);
                }),
            )
            .unwrap();

        store.dispatch(CounterAction::Increment);
        assert_eq!(fires.get(), 1);
        assert_eq!(store.state(), 2);
    }

    #[test]
    fn cancel_before_match_suppresses_firing() {
        let store = observed_counter();
        let fires = Rc::new(Cell::new(0));

        let counter = Rc::clone(&fires);
        let subscription = store
            .on(
                Watch::change(|prev: &u32, next: &u32| prev != next)
                    .run(move |_, _| counter.set(counter.get() + 1)),
            )
            .unwrap();

        subscription.cancel();
        store.dispatch(CounterAction::Increment);
        store.dispatch(CounterAction::Add(9));
        assert_eq!(fires.get(), 0);
    }

    #[test]
    fn cancel_after_once_fired_is_a_noop() {
        let store = observed_counter();
        let subscription = store
            .once(Watch::change(|prev: &u32, next: &u32| prev != next).run(|_, _| {}))
            .unwrap();

        store.dispatch(CounterAction::Increment);
        subscription.cancel();
        subscription.cancel();
        store.dispatch(CounterAction::Increment);
    }

    #[test]
    fn handler_dispatch_is_observed_as_its_own_transition() {
        let store = observed_counter();
        let kinds_fired = Rc::new(RefCell::new(Vec::new()));

        // The first observer dispatches an ADD from its handler; the nested
        // dispatch must run as its own pass with its own recorded kind.
        let trigger = store.clone();
        store
            .on(Watch::action("INCREMENT").run(move |_, next| {
                if *next == 1 {
                    trigger.dispatch(CounterAction::Add(10));
                }
            }))
            .unwrap();

        let log = Rc::clone(&kinds_fired);
        store
            .on(Watch::action("ADD").run(move |prev, next| {
                log.borrow_mut().push((*prev, *next));
            }))
            .unwrap();

        store.dispatch(CounterAction::Increment);
        assert_eq!(*kinds_fired.borrow(), vec![(1, 11)]);
    }

    #[test]
    fn pass_through_surface_still_works() {
        let store = observed_counter();
        let plain = Rc::new(Cell::new(0));

        let counter = Rc::clone(&plain);
        let subscription = store.subscribe(move || counter.set(counter.get() + 1));
        store.dispatch(CounterAction::Increment);
        assert_eq!(store.state(), 1);
        assert_eq!(plain.get(), 1);
        subscription.cancel();
    }
}
