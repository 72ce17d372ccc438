//! # Store Engine
//!
//! This module ties the catalog, cart and order history together into the
//! mock-store engine. It owns the three persisted lists and is the only code
//! that mutates them:
//!
//! - the catalog is seeded once on first run and thereafter only touched by
//!   order placement (stock decrements),
//! - every cart mutation writes the full cart snapshot back immediately,
//! - placing an order performs the inventory/history/cart writes in a fixed
//!   sequence.
//!
//! The engine assumes a single user on a single device; there is no
//! concurrent writer and no locking.

use log::{info, warn};

use crate::storage::{Storage, CART_KEY, INVENTORY_KEY, ORDERS_KEY};
use crate::store_errors::StoreError;
use crate::store_model::{Cart, CatalogItem, Category, Order};

/// The fixed catalog used to seed the store on first run
pub fn seed_catalog() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new("1", "Potato", Category::Vegetables, 30.0, "kg", 50)
            .with_image("🥔")
            .with_discount(10),
        CatalogItem::new("2", "Onion", Category::Vegetables, 40.0, "kg", 45).with_image("🧅"),
        CatalogItem::new("3", "Tomato", Category::Vegetables, 35.0, "kg", 40)
            .with_image("🍅")
            .with_discount(15),
        CatalogItem::new("4", "Carrot", Category::Vegetables, 50.0, "kg", 30).with_image("🥕"),
        CatalogItem::new("5", "Capsicum", Category::Vegetables, 60.0, "kg", 25).with_image("🫑"),
        CatalogItem::new("6", "Cauliflower", Category::Vegetables, 45.0, "kg", 20)
            .with_image("🥦"),
        CatalogItem::new("7", "Apple", Category::Fruits, 120.0, "kg", 35).with_image("🍎"),
        CatalogItem::new("8", "Banana", Category::Fruits, 50.0, "dozen", 60)
            .with_image("🍌")
            .with_discount(5),
        CatalogItem::new("9", "Orange", Category::Fruits, 80.0, "kg", 40).with_image("🍊"),
        CatalogItem::new("10", "Mango", Category::Fruits, 150.0, "kg", 25)
            .with_image("🥭")
            .with_discount(20),
        CatalogItem::new("11", "Milk", Category::Dairy, 60.0, "liter", 100).with_image("🥛"),
        CatalogItem::new("12", "Cheese", Category::Dairy, 180.0, "500g", 30).with_image("🧀"),
        CatalogItem::new("13", "Yogurt", Category::Dairy, 50.0, "400g", 50).with_image("🥛"),
        CatalogItem::new("14", "Rice", Category::Grains, 70.0, "kg", 100).with_image("🍚"),
        CatalogItem::new("15", "Wheat Flour", Category::Grains, 45.0, "kg", 80).with_image("🌾"),
        CatalogItem::new("16", "Lentils", Category::Grains, 120.0, "kg", 60).with_image("🫘"),
        CatalogItem::new("17", "Turmeric", Category::Spices, 200.0, "100g", 40).with_image("🌟"),
        CatalogItem::new("18", "Chili Powder", Category::Spices, 150.0, "100g", 35)
            .with_image("🌶️"),
        CatalogItem::new("19", "Cumin", Category::Spices, 180.0, "100g", 30).with_image("🟤"),
        CatalogItem::new("20", "Coriander", Category::Spices, 100.0, "100g", 45).with_image("🌿"),
    ]
}

/// The mock-store engine: catalog, cart and order history backed by durable
/// key-value storage
#[derive(Debug)]
pub struct Store {
    storage: Storage,
    catalog: Vec<CatalogItem>,
    cart: Cart,
    orders: Vec<Order>,
}

impl Store {
    /// Load the store state from `storage`.
    ///
    /// The persisted catalog is authoritative once it exists; on first run
    /// the fixed seed catalog is returned and persisted. A storage read
    /// failure is logged and falls back to an empty catalog rather than
    /// surfacing as fatal. Cart and order history load best-effort, absent
    /// or unreadable values start empty.
    pub async fn load(storage: Storage) -> Self {
        let catalog = match storage.read::<Vec<CatalogItem>>(INVENTORY_KEY).await {
            Ok(Some(saved)) => saved,
            Ok(None) => {
                let seed = seed_catalog();
                info!("Seeding catalog with {} items", seed.len());
                if let Err(e) = storage.write(INVENTORY_KEY, &seed).await {
                    warn!("Failed to persist seed catalog: {e}");
                }
                seed
            }
            Err(e) => {
                warn!("Failed to load catalog: {e}");
                Vec::new()
            }
        };

        let cart = match storage.read::<Cart>(CART_KEY).await {
            Ok(Some(saved)) => saved,
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!("Failed to load cart: {e}");
                Cart::new()
            }
        };

        let orders = match storage.read::<Vec<Order>>(ORDERS_KEY).await {
            Ok(Some(saved)) => saved,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to load order history: {e}");
                Vec::new()
            }
        };

        info!(
            "Store loaded: {} catalog items, {} cart lines, {} past orders",
            catalog.len(),
            cart.len(),
            orders.len()
        );

        Self {
            storage,
            catalog,
            cart,
            orders,
        }
    }

    /// The full catalog, including out-of-stock items
    pub fn catalog(&self) -> &[CatalogItem] {
        &self.catalog
    }

    /// The current cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Order history, most recent first
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Look up a catalog item by id
    pub fn item(&self, item_id: &str) -> Option<&CatalogItem> {
        self.catalog.iter().find(|item| item.id == item_id)
    }

    /// Items shown in the storefront: in stock, name matching `query`
    /// (case-insensitive substring, empty matches all), and in `category`
    /// when one is given.
    pub fn visible_items(&self, query: &str, category: Option<Category>) -> Vec<&CatalogItem> {
        let query = query.to_lowercase();
        self.catalog
            .iter()
            .filter(|item| item.stock > 0)
            .filter(|item| query.is_empty() || item.name.to_lowercase().contains(&query))
            .filter(|item| category.is_none_or(|c| item.category == c))
            .collect()
    }

    /// Add one unit of the given item to the cart and persist the cart.
    ///
    /// Fails with [`StoreError::StockLimit`] when the increment would exceed
    /// the item's stock; the cart is unchanged in that case. Unknown ids are
    /// logged and ignored.
    pub async fn add_to_cart(&mut self, item_id: &str) -> Result<(), StoreError> {
        let Some(item) = self.item(item_id).cloned() else {
            warn!("add_to_cart: unknown item id '{item_id}'");
            return Ok(());
        };

        self.cart.add(&item)?;
        self.storage.write(CART_KEY, &self.cart).await
    }

    /// Remove one unit of the given item from the cart and persist the cart
    pub async fn remove_from_cart(&mut self, item_id: &str) -> Result<(), StoreError> {
        self.cart.remove(item_id);
        self.storage.write(CART_KEY, &self.cart).await
    }

    /// Convert the cart into an order.
    ///
    /// Fails with [`StoreError::EmptyCart`] when the cart has no lines, with
    /// no side effects. Otherwise the order record is built from the cart
    /// snapshot and its total, the catalog stock is reduced by the ordered
    /// quantities (floored at zero), and the three writes go out in strict
    /// sequence: inventory, then order history, then the cleared cart. A
    /// crash before the history write therefore reads as "nothing happened"
    /// rather than an order that was placed but never recorded.
    pub async fn place_order(&mut self) -> Result<Order, StoreError> {
        if self.cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        let order = Order::from_cart(&self.cart);
        info!("Placing {order}");

        let new_catalog: Vec<CatalogItem> = self
            .catalog
            .iter()
            .map(|item| {
                let ordered = self.cart.quantity_of(&item.id);
                if ordered > 0 {
                    let mut updated = item.clone();
                    updated.stock = item.stock.saturating_sub(ordered);
                    updated
                } else {
                    item.clone()
                }
            })
            .collect();

        self.storage.write(INVENTORY_KEY, &new_catalog).await?;
        self.catalog = new_catalog;

        self.orders.insert(0, order.clone());
        self.storage.write(ORDERS_KEY, &self.orders).await?;

        self.cart.clear();
        self.storage.write(CART_KEY, &self.cart).await?;

        info!("Order {} placed and delivered", order.id);
        Ok(order)
    }
}
