//! Statewatch: change observation for unidirectional state containers
//!
//! Statewatch layers a change-observation API over any unidirectional state
//! container: register interest in specific transitions, by action kind or
//! by a predicate over (previous, next) state, and receive exactly those two
//! snapshots when the condition matches. One-shot observers detach
//! themselves after their first match.
//!
//! # Core Concepts
//!
//! - **Container**: any state holder with snapshot/subscribe/dispatch, via
//!   the `Container` trait; `Store` is the shipped reducer-driven one
//! - **Watch**: what to match (kind, predicate, or both) and what to run
//! - **Observer**: one registered watch, tracking its own previous snapshot
//!
//! The model is single-threaded and synchronous: dispatch, reduction, and
//! every observer notification happen in one call stack, and a dispatch
//! issued from inside a handler is deferred until the current pass ends.
//!
//! # Example
//!
//! ```rust
//! use statewatch::core::Action;
//! use statewatch::observe::{Observe, Watch};
//! use statewatch::store::Store;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Session {
//!     user: Option<String>,
//!     requests: u64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum SessionAction {
//!     LogIn(String),
//!     Request,
//! }
//!
//! impl Action for SessionAction {
//!     fn kind(&self) -> &'static str {
//!         match self {
//!             Self::LogIn(_) => "LOG_IN",
//!             Self::Request => "REQUEST",
//!         }
//!     }
//! }
//!
//! let store = Store::new(
//!     Session { user: None, requests: 0 },
//!     |session, action: &SessionAction| match action {
//!         SessionAction::LogIn(name) => Session {
//!             user: Some(name.clone()),
//!             ..session.clone()
//!         },
//!         SessionAction::Request => Session {
//!             requests: session.requests + 1,
//!             ..session.clone()
//!         },
//!     },
//! )
//! .observed();
//!
//! store
//!     .on(
//!         Watch::change(|prev: &Session, next: &Session| prev.user != next.user)
//!             .run(|_prev, next| println!("user changed to {:?}", next.user)),
//!     )
//!     .unwrap();
//!
//! store.dispatch(SessionAction::Request); // user unchanged, no callback
//! store.dispatch(SessionAction::LogIn("ada".into())); // fires
//! ```

pub mod core;
pub mod observe;
pub mod store;

// Re-export commonly used types
pub use crate::core::{Action, Container, Subscription};
pub use crate::observe::{Observe, ObservedStore, Watch, WatchError};
pub use crate::store::Store;
