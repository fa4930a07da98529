//! Generic actor framework for an ordered, in-memory resource store.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that stored types implement
//! - [`Producer`] - Background source of new entities, driven by the actor's ticker
//! - [`ResourceActor`] - Generic actor that owns the collection and the ticker
//! - [`ResourceClient`] - Type-safe handle for sending requests
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
