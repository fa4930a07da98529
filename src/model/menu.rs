//! Menu items and the cafe catalog.
//!
//! Menu items are immutable reference data. Order lines hold an `Arc` to the item
//! they were created from, so an order keeps the exact item (and price) it was
//! placed with.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::sync::Arc;
use thiserror::Error;

/// Menu section a [`MenuItem`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Drink,
    Snack,
    Dessert,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Food,
        Category::Drink,
        Category::Snack,
        Category::Dessert,
    ];
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Category::Food => "Food",
            Category::Drink => "Drink",
            Category::Snack => "Snack",
            Category::Dessert => "Dessert",
        };
        f.write_str(label)
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    /// Unit price in the smallest currency unit (IDR).
    pub price: u64,
    pub available: bool,
    pub popular: bool,
}

impl MenuItem {
    /// Creates an available, non-popular item.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        price: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category,
            price,
            available: true,
            popular: false,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn popular(mut self) -> Self {
        self.popular = true;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

/// Errors raised while building a [`Catalog`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    #[error("Menu item {0} has a zero price")]
    ZeroPrice(String),

    #[error("Duplicate menu item id: {0}")]
    DuplicateId(String),
}

/// The static menu shared by the store, the generator and the fixtures.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Arc<MenuItem>>,
}

impl Catalog {
    /// Builds a catalog, rejecting zero prices and duplicate ids.
    pub fn new(items: impl IntoIterator<Item = MenuItem>) -> Result<Self, MenuError> {
        let mut seen = HashSet::new();
        let mut checked = Vec::new();
        for item in items {
            if item.price == 0 {
                return Err(MenuError::ZeroPrice(item.id));
            }
            if !seen.insert(item.id.clone()) {
                return Err(MenuError::DuplicateId(item.id));
            }
            checked.push(Arc::new(item));
        }
        Ok(Self { items: checked })
    }

    /// The cafe menu.
    pub fn cafe() -> Self {
        Self {
            items: cafe_items().into_iter().map(Arc::new).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Arc<MenuItem>> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<MenuItem>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items that can currently be ordered.
    pub fn available(&self) -> Vec<Arc<MenuItem>> {
        self.items.iter().filter(|item| item.available).cloned().collect()
    }

    pub fn by_category(&self, category: Category) -> Vec<Arc<MenuItem>> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .cloned()
            .collect()
    }

    pub fn popular(&self) -> Vec<Arc<MenuItem>> {
        self.items.iter().filter(|item| item.popular).cloned().collect()
    }
}

fn cafe_items() -> Vec<MenuItem> {
    use Category::*;
    vec![
        MenuItem::new("m1", "Nasi Goreng Spesial", Food, 28_000)
            .describe("Fried rice with egg, chicken and crackers")
            .popular(),
        MenuItem::new("m2", "Mie Goreng Jawa", Food, 25_000)
            .describe("Javanese-style fried noodles")
            .popular(),
        MenuItem::new("m3", "Ayam Geprek", Food, 32_000)
            .describe("Smashed crispy chicken with chili sambal"),
        MenuItem::new("m4", "Sate Ayam (10 tusuk)", Food, 35_000)
            .describe("Ten chicken skewers with peanut sauce"),
        MenuItem::new("m5", "Gado-Gado", Food, 22_000)
            .describe("Vegetable salad with peanut dressing"),
        MenuItem::new("d1", "Es Kopi Susu", Drink, 18_000)
            .describe("Iced coffee with palm sugar milk")
            .popular(),
        MenuItem::new("d2", "Es Teh Manis", Drink, 8_000).describe("Sweet iced tea"),
        MenuItem::new("d3", "Jus Alpukat", Drink, 20_000)
            .describe("Avocado juice with chocolate drizzle")
            .popular(),
        MenuItem::new("d4", "Es Jeruk Nipis", Drink, 12_000).describe("Iced lime juice"),
        MenuItem::new("d5", "Cappuccino", Drink, 22_000).describe("Espresso with steamed milk"),
        MenuItem::new("d6", "Matcha Latte", Drink, 25_000)
            .describe("Japanese green tea latte")
            .unavailable(),
        MenuItem::new("s1", "Pisang Goreng", Snack, 15_000).describe("Fried banana fritters"),
        MenuItem::new("s2", "Kentang Goreng", Snack, 18_000).describe("French fries"),
        MenuItem::new("s3", "Risoles Mayo", Snack, 12_000)
            .describe("Crispy rolls with mayonnaise filling"),
        MenuItem::new("ds1", "Es Krim Vanilla", Dessert, 15_000)
            .describe("Two scoops of vanilla ice cream"),
        MenuItem::new("ds2", "Brownies Coklat", Dessert, 20_000)
            .describe("Fudgy chocolate brownies"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cafe_catalog_shape() {
        let catalog = Catalog::cafe();
        assert_eq!(catalog.len(), 16);
        assert_eq!(catalog.available().len(), 15);
        assert!(!catalog.get("d6").unwrap().available);
        assert_eq!(catalog.by_category(Category::Drink).len(), 6);
        assert_eq!(catalog.popular().len(), 4);
        assert!(catalog.iter().all(|item| item.price > 0));
    }

    #[test]
    fn test_cafe_catalog_passes_validation() {
        let validated = Catalog::new(cafe_items()).unwrap();
        let shipped = Catalog::cafe();
        assert_eq!(validated.len(), shipped.len());
        assert!(validated.iter().zip(shipped.iter()).all(|(a, b)| a == b));
    }

    #[test]
    fn test_catalog_rejects_bad_items() {
        let zero = Catalog::new([MenuItem::new("x", "Free", Category::Snack, 0)]);
        assert_eq!(zero.unwrap_err(), MenuError::ZeroPrice("x".into()));

        let duplicate = Catalog::new([
            MenuItem::new("x", "One", Category::Snack, 1_000),
            MenuItem::new("x", "Two", Category::Snack, 2_000),
        ]);
        assert_eq!(duplicate.unwrap_err(), MenuError::DuplicateId("x".into()));
    }
}
