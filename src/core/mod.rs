//! Core vocabulary types.
//!
//! This module contains the types the rest of the crate is built from:
//! - Action discrimination via the `Action` trait
//! - The `Container` seam over any unidirectional state container
//! - `Subscription` cancellation handles

mod action;
mod container;
mod subscription;

pub use action::Action;
pub use container::Container;
pub use subscription::Subscription;
