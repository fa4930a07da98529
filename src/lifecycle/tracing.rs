//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`. Module paths are hidden (`with_target(false)`); log lines carry
//! an `entity_type` field instead.
//!
//! ```bash
//! # Store activity: creates, status changes, deletes, generated orders, toggles
//! RUST_LOG=info cargo run
//!
//! # Full payloads and ignored stale ids
//! RUST_LOG=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a generated order looks like:
//!
//! ```text
//! INFO Ticker armed entity_type="Order" period_ms=10000
//! INFO Created entity_type="Order" id=ORD1760601600123 size=4
//! ```

/// Initializes the global subscriber. Call once, from the binary.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
