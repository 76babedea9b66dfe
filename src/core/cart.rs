use crate::domain::model::{Cart, CartLine, Product};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::watch;

/// Session-owned shopping cart.
///
/// Clones are handles to the same cart. Every mutation runs to completion
/// under the channel lock before returning, and each effective change bumps
/// `Cart::version` and wakes all subscribers. Mutations that change nothing
/// do not notify.
#[derive(Debug, Clone)]
pub struct CartStore {
    state: Arc<watch::Sender<Cart>>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Cart::default());
        Self {
            state: Arc::new(tx),
        }
    }

    /// Adds one unit of `product`. A product already in the cart keeps its
    /// original snapshot and position; only the quantity grows.
    pub fn add_to_cart(&self, product: &Product) {
        let mut quantity = 1;
        self.state.send_modify(|cart| {
            match cart.position(product.id) {
                Some(index) => {
                    let line = &mut cart.lines[index];
                    line.quantity = line.quantity.saturating_add(1);
                    quantity = line.quantity;
                }
                None => cart.lines.push(CartLine::new(product.clone())),
            }
            cart.version += 1;
        });
        tracing::debug!("🛒 Added product {} (quantity now {})", product.id, quantity);
    }

    pub fn remove_from_cart(&self, product_id: u64) {
        let removed = self.state.send_if_modified(|cart| match cart.position(product_id) {
            Some(index) => {
                cart.lines.remove(index);
                cart.version += 1;
                true
            }
            None => false,
        });

        if removed {
            tracing::debug!("🛒 Removed product {}", product_id);
        } else {
            tracing::debug!("🛒 Product {} not in cart, nothing to remove", product_id);
        }
    }

    /// Sets the quantity of an existing line. Zero or negative quantities
    /// remove the line; unknown ids are ignored.
    pub fn update_quantity(&self, product_id: u64, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(product_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let updated = self.state.send_if_modified(|cart| match cart.position(product_id) {
            Some(index) if cart.lines[index].quantity != quantity => {
                cart.lines[index].quantity = quantity;
                cart.version += 1;
                true
            }
            _ => false,
        });

        if updated {
            tracing::debug!("🛒 Product {} quantity set to {}", product_id, quantity);
        }
    }

    pub fn clear_cart(&self) {
        let cleared = self.state.send_if_modified(|cart| {
            if cart.lines.is_empty() {
                return false;
            }
            cart.lines.clear();
            cart.version += 1;
            true
        });

        if cleared {
            tracing::debug!("🛒 Cart cleared");
        }
    }

    pub fn total_items(&self) -> u64 {
        self.state.borrow().total_items()
    }

    pub fn total_price(&self) -> Decimal {
        self.state.borrow().total_price()
    }

    pub fn contains(&self, product_id: u64) -> bool {
        self.state.borrow().position(product_id).is_some()
    }

    pub fn quantity_of(&self, product_id: u64) -> u32 {
        self.state
            .borrow()
            .line(product_id)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }

    /// Copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Receiver that is marked changed after every effective mutation.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }
}
