//! Builds a session cart from a batch of cart commands.

use crate::core::cart::CartStore;
use crate::domain::model::Product;
use crate::domain::ports::ProductSource;
use crate::utils::error::{Result, StoreError};
use std::collections::HashMap;

/// Cart mutations collected from one invocation. They are applied as adds,
/// then quantity updates, then removals, then clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartCommands {
    pub add: Vec<u64>,
    pub set: Vec<(u64, i64)>,
    pub remove: Vec<u64>,
    pub clear: bool,
}

#[derive(Debug, Clone)]
pub struct CartSession {
    pub cart: CartStore,
    /// Ids that were added but do not exist, each listed once.
    pub skipped: Vec<u64>,
}

/// Fetches every added product once and applies `commands` to a fresh cart.
///
/// Unknown ids are skipped and remembered so they are not requested again.
/// Any other source error aborts the batch.
pub async fn build_cart(source: &dyn ProductSource, commands: &CartCommands) -> Result<CartSession> {
    let cart = CartStore::new();
    let mut fetched: HashMap<u64, Option<Product>> = HashMap::new();
    let mut skipped = Vec::new();

    for &id in &commands.add {
        if !fetched.contains_key(&id) {
            let product = match source.get_product(id).await {
                Ok(product) => Some(product),
                Err(StoreError::NotFound { id }) => {
                    tracing::info!("Product {} not found, skipping", id);
                    skipped.push(id);
                    None
                }
                Err(e) => return Err(e),
            };
            fetched.insert(id, product);
        }
        if let Some(Some(product)) = fetched.get(&id) {
            cart.add_to_cart(product);
        }
    }
    for &(id, quantity) in &commands.set {
        cart.update_quantity(id, quantity);
    }
    for &id in &commands.remove {
        cart.remove_from_cart(id);
    }
    if commands.clear {
        cart.clear_cart();
    }

    tracing::debug!(
        "🛒 Built cart with {} lines, {} unknown ids skipped",
        cart.snapshot().lines.len(),
        skipped.len()
    );
    Ok(CartSession { cart, skipped })
}
