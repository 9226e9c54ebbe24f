//! Core Action trait for dispatched values.
//!
//! Actions describe intended state transitions. The observation layer never
//! looks inside an action; it only reads the kind discriminator, which is
//! what kind-filtered observers match against.

use std::fmt::Debug;

/// Trait for values that can be dispatched through a container.
///
/// # Required Traits
///
/// - `Clone`: Actions may be queued for deferred dispatch
/// - `Debug`: Actions appear in trace output
///
/// # Example
///
/// ```rust
/// use statewatch::core::Action;
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
/// assert_eq!(CounterAction::Increment.kind(), "INCREMENT");
/// ```
pub trait Action: Clone + Debug + 'static {
    /// Get the action's kind discriminator.
    ///
    /// Kind-filtered observers fire only when the most recently dispatched
    /// action's kind equals theirs. Returns a static string reference for
    /// zero-cost comparison.
    fn kind(&self) -> &'static str;
}
