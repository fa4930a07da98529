//! Background order generation.
//!
//! [`OrderGenerator`] is plugged into the order actor as its
//! [`Producer`](crate::framework::Producer); the actor decides when to tick,
//! the generator decides whether a tick yields an order and what it contains.

pub mod generator;

pub use generator::*;
