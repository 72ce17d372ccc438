//! # Store Data Model
//!
//! This module defines the data structures for the mock grocery store: catalog
//! items, the cart and its lines, and completed orders. It also owns the pure
//! price computations so that discounts and totals are derived in exactly one
//! place.
//!
//! ## Core Concepts
//!
//! - **CatalogItem**: A purchasable product with price, stock and an optional discount
//! - **Cart**: The in-progress selection of catalog items, one line per item id
//! - **Order**: An immutable snapshot of a cart at placement time
//!
//! ## Usage
//!
//! ```rust
//! use snackit::store_model::{Cart, CatalogItem, Category};
//!
//! let potato = CatalogItem::new("1", "Potato", Category::Vegetables, 30.0, "kg", 50)
//!     .with_discount(10);
//!
//! let mut cart = Cart::new();
//! cart.add(&potato).unwrap();
//! assert_eq!(cart.total(), 27.0);
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::store_errors::StoreError;

/// Product categories offered by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Vegetables,
    Fruits,
    Dairy,
    Grains,
    Spices,
    /// Fallback for anything that does not fit the named shelves
    Other,
}

impl Category {
    /// All categories shown as filter chips in the storefront
    pub fn all() -> [Category; 6] {
        [
            Category::Vegetables,
            Category::Fruits,
            Category::Dairy,
            Category::Grains,
            Category::Spices,
            Category::Other,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Vegetables => "Vegetables",
            Category::Fruits => "Fruits",
            Category::Dairy => "Dairy",
            Category::Grains => "Grains",
            Category::Spices => "Spices",
            Category::Other => "Other",
        };
        write!(f, "{name}")
    }
}

/// A purchasable item in the store catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique item identifier
    pub id: String,

    /// Product name (e.g., "Potato", "Wheat Flour")
    pub name: String,

    /// Shelf the item belongs to
    pub category: Category,

    /// Unit price, non-negative
    pub price: f64,

    /// Unit label the price refers to (e.g., "kg", "dozen", "100g")
    pub unit: String,

    /// Units currently in stock, never negative
    pub stock: u32,

    /// Emoji tag shown in listings
    #[serde(default)]
    pub image: String,

    /// Optional discount percent (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,
}

impl CatalogItem {
    /// Create a new catalog item without a discount
    pub fn new(
        id: &str,
        name: &str,
        category: Category,
        price: f64,
        unit: &str,
        stock: u32,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
            price,
            unit: unit.to_string(),
            stock,
            image: String::new(),
            discount: None,
        }
    }

    /// Set the discount percent
    pub fn with_discount(mut self, percent: u8) -> Self {
        self.discount = Some(percent);
        self
    }

    /// Set the emoji tag
    pub fn with_image(mut self, image: &str) -> Self {
        self.image = image.to_string();
        self
    }

    /// Effective price per unit after the discount, if any, is applied.
    ///
    /// This is the single implementation of the discount arithmetic; totals
    /// and per-line prices are all derived from it.
    pub fn final_unit_price(&self) -> f64 {
        match self.discount {
            Some(percent) => self.price - self.price * f64::from(percent) / 100.0,
            None => self.price,
        }
    }

    /// Amount saved per unit, zero when no discount is set
    pub fn discount_per_unit(&self) -> f64 {
        match self.discount {
            Some(percent) => self.price * f64::from(percent) / 100.0,
            None => 0.0,
        }
    }
}

/// One cart entry: a catalog item plus a positive quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Snapshot of the catalog item at add time
    pub item: CatalogItem,

    /// Number of units selected, always at least 1
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line after any discount
    pub fn final_price(&self) -> f64 {
        self.item.final_unit_price() * f64::from(self.quantity)
    }
}

/// The user's in-progress selection, at most one line per item id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart
    pub fn new() -> Self {
        Self::default()
    }

    /// The cart lines in insertion order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines in the cart
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity of the given item currently in the cart, 0 when absent
    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.lines
            .iter()
            .find(|line| line.item.id == item_id)
            .map_or(0, |line| line.quantity)
    }

    /// Add one unit of `item` to the cart.
    ///
    /// An existing line is incremented by exactly 1, unless the new quantity
    /// would exceed the item's stock, in which case the cart is left untouched
    /// and [`StoreError::StockLimit`] is returned. A new line starts at
    /// quantity 1; items are only visible in the storefront while stock is
    /// positive, so the first unit is always legal.
    pub fn add(&mut self, item: &CatalogItem) -> Result<(), StoreError> {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == item.id) {
            if line.quantity >= item.stock {
                return Err(StoreError::StockLimit {
                    name: item.name.clone(),
                    stock: item.stock,
                    unit: item.unit.clone(),
                });
            }
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                item: item.clone(),
                quantity: 1,
            });
        }
        Ok(())
    }

    /// Remove one unit of the given item; the line disappears once its
    /// quantity reaches zero. Unknown ids are ignored.
    pub fn remove(&mut self, item_id: &str) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == item_id) {
            if line.quantity > 1 {
                line.quantity -= 1;
            } else {
                self.lines.retain(|line| line.item.id != item_id);
            }
        }
    }

    /// Drop every line
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Amount to pay: sum of discounted line prices
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::final_price).sum()
    }

    /// Total savings from discounted lines
    pub fn discount_total(&self) -> f64 {
        self.lines
            .iter()
            .map(|line| line.item.discount_per_unit() * f64::from(line.quantity))
            .sum()
    }

    /// Sum of the undiscounted line prices, i.e. `total() + discount_total()`
    pub fn undiscounted_total(&self) -> f64 {
        self.lines
            .iter()
            .map(|line| line.item.price * f64::from(line.quantity))
            .sum()
    }
}

/// Terminal status of an order. The mock store delivers instantly, so no
/// other states are modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "delivered")]
    Delivered,
}

/// An immutable record of a completed purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Time-based identifier, unique per placement
    pub id: String,

    /// Snapshot of the cart lines at placement time
    pub items: Vec<CartLine>,

    /// Amount paid, computed from the cart before it was cleared
    pub total: f64,

    /// Placement time, RFC 3339
    pub timestamp: String,

    pub status: OrderStatus,
}

impl Order {
    /// Build an order from the current cart contents
    pub fn from_cart(cart: &Cart) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis().to_string(),
            items: cart.lines().to_vec(),
            total: cart.total(),
            timestamp: now.to_rfc3339(),
            status: OrderStatus::Delivered,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order {} ({} items, total {:.2})", self.id, self.items.len(), self.total)
    }
}
