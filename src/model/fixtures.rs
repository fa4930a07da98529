//! Fixed reference data: the customer name pool and the example orders loaded
//! by `initialize`.

use crate::model::{Catalog, Order, OrderCreate, OrderLine, OrderStatus};
use crate::order_actor::OrderError;
use chrono::{DateTime, Duration, Utc};

/// Names the generator draws customers from.
pub const CUSTOMER_NAMES: [&str; 10] = [
    "Budi Santoso",
    "Siti Nurhaliza",
    "Ahmad Yani",
    "Dewi Lestari",
    "Rizky Febian",
    "Maya Sari",
    "Andi Wijaya",
    "Putri Ayu",
    "Dimas Prasetyo",
    "Rani Kartika",
];

struct SeedOrder {
    id: &'static str,
    table: u32,
    customer: &'static str,
    lines: &'static [(&'static str, u32)],
    status: OrderStatus,
    minutes_ago: i64,
}

const SEED_ORDERS: [SeedOrder; 3] = [
    SeedOrder {
        id: "ORD001",
        table: 5,
        customer: "Budi Santoso",
        lines: &[("m1", 2), ("d1", 2)],
        status: OrderStatus::Preparing,
        minutes_ago: 15,
    },
    SeedOrder {
        id: "ORD002",
        table: 3,
        customer: "Siti Nurhaliza",
        lines: &[("m3", 1), ("d3", 1), ("s1", 1)],
        status: OrderStatus::New,
        minutes_ago: 5,
    },
    SeedOrder {
        id: "ORD003",
        table: 8,
        customer: "Ahmad Yani",
        lines: &[("m2", 1), ("d2", 1)],
        status: OrderStatus::Ready,
        minutes_ago: 25,
    },
];

/// Builds the three example orders relative to `now`, in store order.
///
/// Totals are computed from the catalog like any other order.
pub fn seed_orders(catalog: &Catalog, now: DateTime<Utc>) -> Result<Vec<Order>, OrderError> {
    SEED_ORDERS
        .iter()
        .map(|seed| {
            let lines = seed
                .lines
                .iter()
                .map(|&(item_id, quantity)| {
                    catalog
                        .get(item_id)
                        .cloned()
                        .map(|item| OrderLine::new(item, quantity))
                        .ok_or_else(|| OrderError::UnknownMenuItem(item_id.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            let params = OrderCreate {
                customer_name: seed.customer.to_string(),
                table_number: Some(seed.table),
                lines,
                status: seed.status,
            };
            Order::new(seed.id.into(), params, now - Duration::minutes(seed.minutes_ago))
        })
        .collect()
}
