//! Counter Once
//!
//! This example demonstrates one-shot observation: a watch that fires on its
//! first match and then detaches itself.
//!
//! Key concepts:
//! - `once` registration with a kind plus a predicate
//! - Self-detachment before the handler runs
//! - Explicit cancellation of a never-matched watch
//!
//! Run with: cargo run --example counter_once

use statewatch::core::Action;
use statewatch::observe::{Observe, Watch};
use statewatch::store::Store;

#[derive(Clone, Debug)]
enum CounterAction {
    Increment,
    Reset,
}

impl Action for CounterAction {
    fn kind(&self) -> &'static str {
        match self {
            Self::Increment => "INCREMENT",
            Self::Reset => "RESET",
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== Counter Once Example ===\n");

    let store = Store::new(0u32, |count: &u32, action: &CounterAction| match action {
        CounterAction::Increment => count + 1,
        CounterAction::Reset => 0,
    })
    .observed();

    // Fires once, the first time the counter crosses 3.
    store
        .once(
            Watch::action_when("INCREMENT", |_prev: &u32, next: &u32| *next >= 3)
                .run(|prev, next| println!("threshold crossed: {prev} -> {next}")),
        )
        .unwrap();

    // Registered, then cancelled before anything matches.
    let reset_watch = store
        .on(Watch::action("RESET").run(|_prev, _next| println!("reset observed")))
        .unwrap();
    reset_watch.cancel();

    for _ in 0..5 {
        store.dispatch(CounterAction::Increment);
    }
    store.dispatch(CounterAction::Reset); // nothing fires, watch was cancelled

    println!("\nfinal count: {}", store.state());
    println!("\n=== Example Complete ===");
}
