//! User Watch
//!
//! This example demonstrates predicate and kind watches over a small
//! session store.
//!
//! Key concepts:
//! - A predicate watch firing only when the watched slice actually changes
//! - A kind watch firing on every dispatch of that action kind
//! - Per-observer previous-state tracking
//!
//! Run with: cargo run --example user_watch

use statewatch::core::Action;
use statewatch::observe::{Observe, Watch};
use statewatch::store::Store;

#[derive(Clone, Debug, PartialEq)]
struct Session {
    id: u64,
    user: Option<String>,
}

#[derive(Clone, Debug)]
enum SessionAction {
    IncId,
    SetUser(String),
}

impl Action for SessionAction {
    fn kind(&self) -> &'static str {
        match self {
            Self::IncId => "INC_ID",
            Self::SetUser(_) => "SET_USER",
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== User Watch Example ===\n");

    let store = Store::new(
        Session { id: 0, user: None },
        |session: &Session, action: &SessionAction| match action {
            SessionAction::IncId => Session {
                id: session.id + 1,
                ..session.clone()
            },
            SessionAction::SetUser(name) => Session {
                user: Some(name.clone()),
                ..session.clone()
            },
        },
    )
    .observed();

    // Fires only when the user slice changes, whatever action caused it.
    store
        .on(
            Watch::change(|prev: &Session, next: &Session| prev.user != next.user)
                .run(|prev, next| {
                    println!("user changed: {:?} -> {:?}", prev.user, next.user);
                }),
        )
        .unwrap();

    // Fires on every SET_USER dispatch, changed or not.
    store
        .on(Watch::action("SET_USER").run(|_prev: &Session, next: &Session| {
            println!("SET_USER committed, user is {:?}", next.user);
        }))
        .unwrap();

    store.dispatch(SessionAction::IncId);
    store.dispatch(SessionAction::SetUser("ada".into()));
    store.dispatch(SessionAction::SetUser("ada".into())); // kind watch only
    store.dispatch(SessionAction::SetUser("grace".into()));
    store.dispatch(SessionAction::IncId);

    println!("\nfinal state: {:?}", store.state());
    println!("\n=== Example Complete ===");
}
