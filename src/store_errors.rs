//! # Store Error Types Module
//!
//! This module defines the error types used by the store engine. All of them
//! are recoverable at the UI boundary: they are surfaced as dismissible
//! notices, never treated as fatal.

/// Errors produced by cart, inventory and order operations
#[derive(Debug, Clone)]
pub enum StoreError {
    /// Order attempted with no items in the cart
    EmptyCart,
    /// A cart add would exceed the item's available stock; the add is a no-op
    StockLimit {
        /// Product name, for the user-facing notice
        name: String,
        /// Units available
        stock: u32,
        /// Unit label (e.g., "kg")
        unit: String,
    },
    /// Persistence read failure; callers fall back to in-memory state
    StorageRead(String),
    /// Persistence write failure
    StorageWrite(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::EmptyCart => write!(f, "Cart is empty, please add items first"),
            StoreError::StockLimit { name, stock, unit } => {
                write!(f, "Stock limit for {name}: only {stock} {unit} available")
            }
            StoreError::StorageRead(msg) => write!(f, "Storage read error: {msg}"),
            StoreError::StorageWrite(msg) => write!(f, "Storage write error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}
