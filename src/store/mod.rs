//! Minimal reducer-driven state container.
//!
//! `Store` is the reference [`Container`] implementation: a single state
//! value advanced by a pure reducer, with synchronous ordered listener
//! notification. It exists so the observation layer has something concrete to
//! wrap; the observation layer itself works against any [`Container`].
//!
//! The model is single-threaded and cooperative. Handles are cheap `Rc`
//! clones and none of the types are `Send`.

use crate::core::{Action, Container, Subscription};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use tracing::trace;

type Reducer<S, A> = Box<dyn Fn(&S, &A) -> S>;
type Listener = Rc<dyn Fn()>;

struct Inner<S, A> {
    state: RefCell<S>,
    reducer: Reducer<S, A>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener: Cell<u64>,
    dispatching: Cell<bool>,
    deferred: RefCell<VecDeque<A>>,
}

/// A unidirectional state container driven by a pure reducer.
///
/// Dispatching runs the reducer against the current state, commits the
/// result, and notifies every listener in registration order before
/// returning. A dispatch issued from inside a listener is deferred and runs
/// after the current notification pass completes, so passes never
/// interleave.
///
/// # Example
///
/// ```rust
/// use statewatch::core::Action;
/// use statewatch::store::Store;
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
/// });
///
/// store.dispatch(CounterAction::Increment);
/// store.dispatch(CounterAction::Increment);
/// assert_eq!(store.state(), 2);
///
/// store.dispatch(CounterAction::Reset);
/// assert_eq!(store.state(), 0);
/// ```
pub struct Store<S, A> {
    inner: Rc<Inner<S, A>>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: Clone + 'static, A: Action> Store<S, A> {
    /// Create a store holding `initial` and advanced by `reducer`.
    ///
    /// The reducer must be pure: given the current state and an action, it
    /// returns the next state without side effects.
    pub fn new(initial: S, reducer: impl Fn(&S, &A) -> S + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(initial),
                reducer: Box::new(reducer),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
                dispatching: Cell::new(false),
                deferred: RefCell::new(VecDeque::new()),
            }),
        }
    }

    /// Snapshot the current state.
    pub fn state(&self) -> S {
        self.inner.state.borrow().clone()
    }

    /// Register a listener called once per committed transition, in
    /// registration order.
    ///
    /// A listener registered during a notification pass is not called for
    /// the transition in progress. Cancelling during a pass takes effect for
    /// subsequent passes; listeners already scheduled in the current pass
    /// still run.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        let listener: Listener = Rc::new(listener);
        self.inner.listeners.borrow_mut().push((id, listener));
        trace!(listener = id, "listener attached");

        let inner = Rc::downgrade(&self.inner);
        Subscription::new(move || detach(&inner, id))
    }

    /// Dispatch an action: reduce, commit, notify.
    ///
    /// Re-entrant dispatch (from inside a listener) is deferred and runs
    /// after the current pass; this call then also drains those deferrals
    /// before returning.
    pub fn dispatch(&self, action: A) {
        self.inner.deferred.borrow_mut().push_back(action);
        if self.inner.dispatching.get() {
            return;
        }

        self.inner.dispatching.set(true);
        loop {
            let next = self.inner.deferred.borrow_mut().pop_front();
            let Some(action) = next else {
                break;
            };
            trace!(kind = action.kind(), "reducing");

            let next_state = {
                let state = self.inner.state.borrow();
                (self.inner.reducer)(&state, &action)
            };
            *self.inner.state.borrow_mut() = next_state;

            // Snapshot so cancellation mid-pass cannot skip a listener
            // already scheduled in this pass.
            let pass: Vec<Listener> = self
                .inner
                .listeners
                .borrow()
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect();
            for listener in pass {
                listener();
            }
        }
        self.inner.dispatching.set(false);
    }
}

fn detach<S, A>(inner: &Weak<Inner<S, A>>, id: u64) {
    if let Some(inner) = inner.upgrade() {
        inner
            .listeners
            .borrow_mut()
            .retain(|(listener, _)| *listener != id);
        trace!(listener = id, "listener detached");
    }
}

impl<S: Clone + 'static, A: Action> Container for Store<S, A> {
    type State = S;
    type Action = A;

    fn state(&self) -> S {
        Store::state(self)
    }

    fn subscribe(&self, listener: Box<dyn Fn()>) -> Subscription {
        Store::subscribe(self, listener)
    }

    fn dispatch(&self, action: A) {
        Store::dispatch(self, action)
    }
}
