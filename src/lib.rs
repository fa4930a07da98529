//! # Cafe Order Simulation
//!
//! > **An in-memory cafe order store with a background order generator.**
//!
//! The store keeps the orders of a small cafe newest-first, lets staff move them
//! through `new → preparing → ready → completed`, answers the dashboard views
//! (orders by status, today's revenue, per-status counts, active tables) and,
//! while the simulation is on, injects a random order on some timer ticks.
//!
//! ## 🏗️ Design
//!
//! The store is a single [`ResourceActor`](framework::ResourceActor) task. It owns
//! the collection *and* the generator's interval, and handles requests one at a
//! time, so every mutation is applied whole and a tick can never run after the
//! request that stopped it has been answered. No lock guards the collection.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic actor, its messages and client, and a channel-level mock.
//! - **Key items**: [`ActorEntity`](framework::ActorEntity), [`Producer`](framework::Producer),
//!   [`ResourceActor`](framework::ResourceActor).
//!
//! ### 2. The Data ([`model`])
//! Menu, orders and the pure statistics computed over an order snapshot.
//!
//! ### 3. The Implementation ([`order_actor`], [`simulation`])
//! Order validation, transition policy and the random order generator.
//!
//! ### 4. The Interface ([`clients`])
//! [`OrderClient`](clients::OrderClient) hides message passing behind the store
//! operations.
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! [`OrderSystem`](lifecycle::OrderSystem) starts and stops the store from a
//! [`SimulationConfig`](config::SimulationConfig).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Generate an order on roughly every third second
//! CAFE_SIM_TICK_MS=1000 RUST_LOG=info cargo run
//!
//! cargo test
//! ```

pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod simulation;
