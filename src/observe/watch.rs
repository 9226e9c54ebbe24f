//! Watch configuration for observer registration.

/// Caller-supplied predicate over (previous, next) state snapshots.
pub type Predicate<S> = Box<dyn Fn(&S, &S) -> bool>;

/// Caller-supplied handler invoked with (previous, next) state snapshots.
pub type Handler<S> = Box<dyn Fn(&S, &S)>;

/// Configuration for one observer registration.
///
/// A watch names what to match (an action kind, a predicate over
/// (previous, next) state, or both) and the handler to run on a match.
/// Three constructors cover the three matching shapes:
///
/// - [`Watch::change`] fires whenever the predicate holds across a
///   transition, regardless of which action caused it.
/// - [`Watch::action`] fires on every transition committed by an action of
///   the given kind.
/// - [`Watch::action_when`] fires when the kind matches *and* the predicate
///   holds; the predicate is only evaluated once the kind has matched.
///
/// Attach the handler with [`Watch::run`], then register the watch via
/// [`ObservedStore::on`](super::ObservedStore::on) or
/// [`ObservedStore::once`](super::ObservedStore::once). Registration
/// validates the shape: a watch with neither kind nor predicate is rejected
/// with [`WatchError::MissingPredicate`](super::WatchError::MissingPredicate),
/// one without a handler with
/// [`WatchError::MissingHandler`](super::WatchError::MissingHandler).
///
/// # Example
///
/// ```rust
/// use statewatch::observe::Watch;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct AppState {
///     logged_in: bool,
/// }
///
/// let watch = Watch::change(|prev: &AppState, next: &AppState| {
///     prev.logged_in != next.logged_in
/// })
/// .run(|_prev, next| println!("logged_in is now {}", next.logged_in));
/// # let _ = watch;
/// ```
pub struct Watch<S> {
    pub(super) kind: Option<&'static str>,
    pub(super) predicate: Option<Predicate<S>>,
    pub(super) handler: Option<Handler<S>>,
}

impl<S> Watch<S> {
    /// An empty watch. Needs at least `.when(..)` and `.run(..)` before it
    /// can be registered.
    pub fn new() -> Self {
        Self {
            kind: None,
            predicate: None,
            handler: None,
        }
    }

    /// Watch every transition for which `predicate(previous, next)` holds.
    pub fn change(predicate: impl Fn(&S, &S) -> bool + 'static) -> Self {
        Self {
            kind: None,
            predicate: Some(Box::new(predicate)),
            handler: None,
        }
    }

    /// Watch every transition committed by an action of `kind`.
    pub fn action(kind: &'static str) -> Self {
        Self {
            kind: Some(kind),
            predicate: None,
            handler: None,
        }
    }

    /// Watch transitions committed by an action of `kind` for which
    /// `predicate(previous, next)` also holds.
    pub fn action_when(kind: &'static str, predicate: impl Fn(&S, &S) -> bool + 'static) -> Self {
        Self {
            kind: Some(kind),
            predicate: Some(Box::new(predicate)),
            handler: None,
        }
    }

    /// Add or replace the predicate.
    pub fn when(mut self, predicate: impl Fn(&S, &S) -> bool + 'static) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Set the handler invoked with (previous, next) on each match.
    pub fn run(mut self, handler: impl Fn(&S, &S) + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }
}

impl<S> Default for Watch<S> {
    fn default() -> Self {
        Self::new()
    }
}
