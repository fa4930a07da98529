//! Read-only aggregates over an order snapshot.

use crate::model::{Order, OrderStatus};
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Dashboard figures for one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TodayStats {
    pub total_orders: usize,
    pub completed_orders: usize,
    /// Sum of totals over completed orders only, saturating at `u64::MAX`.
    pub total_revenue: u64,
    /// `total_revenue / completed_orders`, or 0 when nothing is completed.
    pub average_order_value: f64,
    pub pending_orders: usize,
}

impl TodayStats {
    /// Stats over orders created on the current local day.
    pub fn today(orders: &[Order]) -> Self {
        Self::for_day(orders, Local::now().date_naive())
    }

    /// Stats over orders whose creation time falls on `day` in local time.
    pub fn for_day(orders: &[Order], day: NaiveDate) -> Self {
        let mut stats = TodayStats {
            total_orders: 0,
            completed_orders: 0,
            total_revenue: 0,
            average_order_value: 0.0,
            pending_orders: 0,
        };

        let on_day = orders
            .iter()
            .filter(|order| order.created_at.with_timezone(&Local).date_naive() == day);
        for order in on_day {
            stats.total_orders += 1;
            if order.status.is_completed() {
                stats.completed_orders += 1;
                stats.total_revenue = stats.total_revenue.saturating_add(order.total);
            } else {
                stats.pending_orders += 1;
            }
        }

        if stats.completed_orders > 0 {
            stats.average_order_value = stats.total_revenue as f64 / stats.completed_orders as f64;
        }
        stats
    }
}

/// Per-status counts across the whole collection (the dashboard's filter tabs).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub new: usize,
    pub preparing: usize,
    pub ready: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn from_orders(orders: &[Order]) -> Self {
        orders.iter().fold(Self::default(), |mut counts, order| {
            match order.status {
                OrderStatus::New => counts.new += 1,
                OrderStatus::Preparing => counts.preparing += 1,
                OrderStatus::Ready => counts.ready += 1,
                OrderStatus::Completed => counts.completed += 1,
            }
            counts
        })
    }

    pub fn get(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::New => self.new,
            OrderStatus::Preparing => self.preparing,
            OrderStatus::Ready => self.ready,
            OrderStatus::Completed => self.completed,
        }
    }

    pub fn total(&self) -> usize {
        self.new + self.preparing + self.ready + self.completed
    }
}

/// Number of orders still being served at a table.
pub fn active_tables(orders: &[Order]) -> usize {
    orders
        .iter()
        .filter(|order| !order.status.is_completed() && order.table_number.is_some())
        .count()
}
