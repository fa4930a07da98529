//! Random order synthesis over the available part of the menu.
//!
//! Each tick rolls once against [`GeneratorSettings::probability`]; a hit
//! builds one `new` order with 1 to `max_items` lines, each line a uniform pick
//! among available items. Repeated picks stay separate lines.

use crate::framework::Producer;
use crate::model::{Catalog, MenuItem, Order, OrderCreate, OrderLine, OrderStatus, CUSTOMER_NAMES};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::sync::Arc;
use tracing::debug;

/// Shape of the orders the generator synthesizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorSettings {
    /// Chance that a tick yields an order, in `[0, 1]`.
    pub probability: f64,
    /// Line count is uniform in `1..=max_items`.
    pub max_items: u32,
    /// Line quantity is uniform in `1..=max_quantity`.
    pub max_quantity: u32,
    /// Table is uniform in `1..=tables`.
    pub tables: u32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            probability: 0.3,
            max_items: 3,
            max_quantity: 2,
            tables: 10,
        }
    }
}

/// Random order source over the available part of a catalog.
pub struct OrderGenerator<R: Rng> {
    available: Vec<Arc<MenuItem>>,
    settings: GeneratorSettings,
    rng: R,
}

impl<R: Rng> OrderGenerator<R> {
    pub fn new(catalog: &Catalog, settings: GeneratorSettings, rng: R) -> Self {
        Self {
            available: catalog.available(),
            settings,
            rng,
        }
    }

    /// Samples whether this tick should produce an order.
    ///
    /// A probability outside `[0, 1]` is clamped; NaN counts as 0.
    pub fn roll(&mut self) -> bool {
        let probability = self.settings.probability;
        if probability.is_nan() {
            return false;
        }
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }

    /// Builds one random order payload with status `new`.
    ///
    /// Lines pick uniformly among available items; the same item may appear on
    /// several lines. Returns `None` when nothing on the menu is available.
    pub fn synthesize(&mut self) -> Option<OrderCreate> {
        if self.available.is_empty() {
            return None;
        }
        let count = self.rng.random_range(1..=self.settings.max_items.max(1));
        let mut lines = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let item = self.available.choose(&mut self.rng)?.clone();
            let quantity = self.rng.random_range(1..=self.settings.max_quantity.max(1));
            lines.push(OrderLine::new(item, quantity));
        }
        let customer = CUSTOMER_NAMES.choose(&mut self.rng)?;
        let table = self.rng.random_range(1..=self.settings.tables.max(1));

        Some(OrderCreate {
            customer_name: customer.to_string(),
            table_number: Some(table),
            lines,
            status: OrderStatus::New,
        })
    }
}

impl<R: Rng + Send> Producer<Order> for OrderGenerator<R> {
    fn produce(&mut self) -> Option<OrderCreate> {
        if !self.roll() {
            return None;
        }
        let params = self.synthesize()?;
        debug!(customer = %params.customer_name, lines = params.lines.len(), "Synthesized order");
        Some(params)
    }
}
