//! Order-specific resource logic and entity implementation.

pub mod entity;
pub mod error;
pub mod policy;

pub use error::*;
pub use policy::*;

use crate::clients::OrderClient;
use crate::framework::ResourceActor;
use crate::model::{Catalog, Order, OrderId};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Creates a new Order actor and its client.
///
/// Ids are `ORD` followed by the creation time in epoch milliseconds, bumped
/// when needed so that they stay strictly increasing within one store.
pub fn new(capacity: usize, catalog: Arc<Catalog>) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(capacity, order_ids());
    let client = OrderClient::new(generic_client, catalog);
    (actor, client)
}

fn order_ids() -> impl Fn() -> OrderId + Send + Sync + 'static {
    let last = Arc::new(AtomicU64::new(0));
    move || {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let previous = last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        OrderId(format!("ORD{}", now.max(previous + 1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_ids_are_strictly_increasing() {
        let next_id = order_ids();
        let ids: Vec<u64> = (0..100)
            .map(|_| {
                let id = next_id();
                assert!(id.0.starts_with("ORD"));
                id.0["ORD".len()..].parse().unwrap()
            })
            .collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
