//! Represents a cafe order.
//!
//! # Actor Framework
//! [`Order`] implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
//!
//! See [`impl ActorEntity for Order`](crate::order_actor::entity) for details on:
//! - Creation parameters ([`OrderCreate`])
//! - Update parameters ([`OrderUpdate`])

use crate::model::MenuItem;
use crate::order_actor::OrderError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of an order: `new → preparing → ready → completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    New,
    Preparing,
    Ready,
    Completed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::New,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
        }
    }

    /// The following step, or `None` for `completed`.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::New => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Completed),
            OrderStatus::Completed => None,
        }
    }

    pub fn is_completed(self) -> bool {
        self == OrderStatus::Completed
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| OrderError::InvalidStatus(s.to_string()))
    }
}

/// One (menu item, quantity) pairing within an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub menu_item: Arc<MenuItem>,
    pub quantity: u32,
}

impl OrderLine {
    pub fn new(menu_item: Arc<MenuItem>, quantity: u32) -> Self {
        Self {
            menu_item,
            quantity,
        }
    }

    /// `price × quantity`, or `None` if it does not fit in a `u64`.
    pub fn subtotal(&self) -> Option<u64> {
        self.menu_item.price.checked_mul(u64::from(self.quantity))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    /// `None` for takeaway orders.
    pub table_number: Option<u32>,
    pub customer_name: String,
    pub lines: Vec<OrderLine>,
    pub status: OrderStatus,
    /// Sum of the line subtotals at creation time. Never recomputed.
    pub total: u64,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Builds a validated order and snapshots its total.
    ///
    /// # Errors
    /// - [`OrderError::EmptyOrder`] when `params.lines` is empty
    /// - [`OrderError::InvalidQuantity`] when a line has quantity zero
    /// - [`OrderError::InvalidTableNumber`] when the table number is zero
    /// - [`OrderError::TotalOverflow`] when the total does not fit in a `u64`
    pub fn new(
        id: OrderId,
        params: OrderCreate,
        created_at: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        if params.lines.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        if let Some(line) = params.lines.iter().find(|line| line.quantity == 0) {
            return Err(OrderError::InvalidQuantity(line.menu_item.id.clone()));
        }
        if params.table_number == Some(0) {
            return Err(OrderError::InvalidTableNumber(0));
        }

        let total = params
            .lines
            .iter()
            .try_fold(0u64, |total, line| line.subtotal()?.checked_add(total))
            .ok_or(OrderError::TotalOverflow)?;
        Ok(Self {
            id,
            table_number: params.table_number,
            customer_name: params.customer_name,
            lines: params.lines,
            status: params.status,
            total,
            created_at,
        })
    }

    pub fn is_takeaway(&self) -> bool {
        self.table_number.is_none()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }
}

/// Payload for creating a new order. ID, timestamp and total are assigned by the store.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer_name: String,
    pub table_number: Option<u32>,
    pub lines: Vec<OrderLine>,
    pub status: OrderStatus,
}

/// Status changes accepted by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderUpdate {
    /// Replace the status with the given one.
    SetStatus(OrderStatus),
    /// Move one step forward; no-op on a completed order.
    Advance,
}
